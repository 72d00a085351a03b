/// Mask of the permission bits in a file mode
const PERMISSION_BITS: u32 = 0o777;

/// Canonical permission bits every staged file is coerced to
const CANONICAL_PERMISSIONS: u32 = 0o755;

/// Mode of a staged file
///
/// The file-type bits of the stat mode are kept as they are, the permission
/// bits are normalized to a single canonical pattern: executable bits and
/// symlink modes are not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryMode(u32);

impl EntryMode {
    pub fn normalized(mode: u32) -> Self {
        EntryMode((mode & !PERMISSION_BITS) | CANONICAL_PERMISSIONS)
    }

    /// Mode read back from the index, taken verbatim
    pub fn from_raw(mode: u32) -> Self {
        EntryMode(mode)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Octal ASCII form used in tree entries
    pub fn as_octal(&self) -> String {
        format!("{:o}", self.0)
    }
}

impl Default for EntryMode {
    fn default() -> Self {
        EntryMode(0o100000 | CANONICAL_PERMISSIONS)
    }
}

impl TryFrom<&str> for EntryMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        u32::from_str_radix(value, 8)
            .map(EntryMode)
            .map_err(|_| anyhow::anyhow!("Invalid entry mode: {}", value))
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:o}", self.0)
    }
}
