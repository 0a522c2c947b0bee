use std::fmt;
use std::path::PathBuf;

/// The nine POSIX permission bits: owner, group and other × read, write, execute.
///
/// File-type, setuid, setgid and sticky bits are masked off on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PermissionSet(u16);

impl PermissionSet {
    /// Mask covering the bits a `PermissionSet` keeps.
    pub const MASK: u32 = 0o777;

    pub fn from_mode(mode: u32) -> Self {
        Self((mode & Self::MASK) as u16)
    }

    pub fn mode(&self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Display for PermissionSet {
    /// `ls -l` style, e.g. `rwxr-x---`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const FLAGS: [char; 3] = ['r', 'w', 'x'];
        for shift in (0..9).rev() {
            let c = if self.0 & (1 << shift) != 0 {
                FLAGS[2 - shift % 3]
            } else {
                '-'
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// What an entry holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File {
        contents: Vec<u8>,
        /// `None` when the source had no POSIX mode to capture.
        permissions: Option<PermissionSet>,
    },
    Symlink {
        target: PathBuf,
    },
}

/// One logical item in an archive.
///
/// `path` is the entry's relative path with `/` separators and no trailing
/// slash. It is the name the item has on disk, not its key in the ZIP
/// container: see [`codec`](super::codec) for that translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
        }
    }

    pub fn file(
        path: impl Into<String>,
        contents: Vec<u8>,
        permissions: Option<PermissionSet>,
    ) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File {
                contents,
                permissions,
            },
        }
    }

    pub fn symlink(path: impl Into<String>, target: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Symlink {
                target: target.into(),
            },
        }
    }
}
