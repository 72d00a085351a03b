use crate::artifacts::index::index_entry::EntryMetadata;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".git", ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every file under `root_file_path` (the whole workspace by default)
    ///
    /// Paths are returned relative to the workspace root, `/` separated and
    /// sorted ascending. A path outside the workspace or one that does not
    /// exist is an error.
    pub fn list_files(&self, root_file_path: Option<&Path>) -> anyhow::Result<Vec<String>> {
        let root_file_path = match root_file_path {
            Some(p) => std::fs::canonicalize(self.path.join(p))
                .with_context(|| format!("The specified path does not exist: {:?}", p))?,
            None => self.path.to_path_buf(),
        };

        let mut files = if root_file_path.is_dir() {
            WalkDir::new(&root_file_path)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| self.relative_name(entry.path()))
                .filter_map(|name| name.transpose())
                .collect::<anyhow::Result<Vec<_>>>()?
        } else {
            self.relative_name(&root_file_path)?.into_iter().collect()
        };

        files.sort();
        Ok(files)
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| {
            if let Component::Normal(name) = component {
                IGNORED_PATHS.contains(&name.to_string_lossy().as_ref())
            } else {
                false
            }
        })
    }

    /// Path relative to the workspace root, or None when it is ignored
    fn relative_name(&self, path: &Path) -> anyhow::Result<Option<String>> {
        let relative = path
            .strip_prefix(self.path.as_ref())
            .with_context(|| format!("Path is outside the repository: {:?}", path))?;

        if Self::is_ignored(relative) {
            return Ok(None);
        }

        let components = relative
            .components()
            .map(|component| {
                component
                    .as_os_str()
                    .to_str()
                    .ok_or_else(|| anyhow::anyhow!("Invalid file path: {:?}", path))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Some(components.join("/")))
    }

    pub fn read_file(&self, file_path: &str) -> anyhow::Result<Bytes> {
        let file_path = self.full_path(file_path);

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))?;

        Ok(content.into())
    }

    pub fn stat_file(&self, file_path: &str) -> anyhow::Result<EntryMetadata> {
        let metadata = std::fs::metadata(self.full_path(file_path))
            .with_context(|| format!("Unable to stat file {}", file_path))?;

        (file_path, metadata).try_into()
    }

    fn full_path(&self, file_path: &str) -> PathBuf {
        self.path.join(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lists_nested_files_and_skips_git_dir() {
        let dir = TempDir::new().unwrap();
        dir.child("b.txt").write_str("b").unwrap();
        dir.child("a/c.txt").write_str("c").unwrap();
        dir.child(".git/HEAD").write_str("ref").unwrap();
        let workspace = Workspace::new(dir.path().canonicalize().unwrap().into_boxed_path());

        assert_eq!(
            workspace.list_files(None).unwrap(),
            vec!["a/c.txt".to_string(), "b.txt".to_string()]
        );
        assert_eq!(
            workspace.list_files(Some(Path::new("a"))).unwrap(),
            vec!["a/c.txt".to_string()]
        );
    }

    #[test]
    fn missing_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path().canonicalize().unwrap().into_boxed_path());

        assert!(workspace.list_files(Some(Path::new("nope.txt"))).is_err());
    }
}
