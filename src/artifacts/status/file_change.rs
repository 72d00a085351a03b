use colored::{ColoredString, Colorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileChange {
    Modified,
    Deleted,
    Untracked,
}

impl From<&FileChange> for &str {
    fn from(change: &FileChange) -> Self {
        match change {
            FileChange::Modified => "modified:   ",
            FileChange::Deleted => "deleted:    ",
            FileChange::Untracked => "",
        }
    }
}

impl FileChange {
    /// Label followed by the path, colored for the terminal
    pub fn describe(&self, path: &str) -> ColoredString {
        let label: &str = self.into();
        format!("{}{}", label, path).red()
    }

    pub fn is_tracked(&self) -> bool {
        !matches!(self, FileChange::Untracked)
    }
}
