//! Translation between [`Entry`] values and ZIP entry names.
//!
//! ZIP has no portable notion of a symbolic link, so a link is stored as a
//! regular file entry named `<path>.symlink` whose contents are the link
//! target. Directories are stored under `<path>/`. Nothing outside this module
//! looks at entry names to decide what an entry is.

use std::path::{Component, Path, PathBuf};

use crate::error::EntryError;

use super::entry::{Entry, EntryKind, PermissionSet};

/// Suffix marking an entry as an encoded symbolic link.
pub const SYMLINK_SUFFIX: &str = ".symlink";

/// How an entry is laid out in the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredKind {
    Directory,
    File,
    SymlinkMarker,
}

/// A decoded ZIP entry name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredName<'a> {
    pub kind: StoredKind,
    /// Logical path: no trailing slash, no symlink suffix.
    pub path: &'a str,
}

impl StoredName<'_> {
    /// Rebuild the entry from the raw payload and the stored Unix mode.
    pub fn into_entry(self, payload: Vec<u8>, unix_mode: Option<u32>) -> Entry {
        match self.kind {
            StoredKind::Directory => Entry::directory(self.path),
            StoredKind::File => {
                Entry::file(self.path, payload, unix_mode.map(PermissionSet::from_mode))
            }
            StoredKind::SymlinkMarker => {
                Entry::symlink(self.path, crate::platform::target_from_bytes(&payload))
            }
        }
    }

    /// The logical path as a relative filesystem path.
    ///
    /// Absolute paths and `..` components are refused.
    pub fn enclosed_path(&self) -> Result<PathBuf, EntryError> {
        let mut out = PathBuf::new();
        for component in Path::new(self.path).components() {
            match component {
                Component::Normal(part) => out.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(EntryError::UnsafePath(self.path.to_owned()));
                }
            }
        }
        Ok(out)
    }
}

/// Decode a ZIP entry name.
///
/// `is_dir` is the backend's own directory flag, which some writers set
/// without a trailing slash.
pub fn decode(name: &str, is_dir: bool) -> Result<StoredName<'_>, EntryError> {
    if is_dir || name.ends_with('/') {
        return Ok(StoredName {
            kind: StoredKind::Directory,
            path: name.trim_end_matches('/'),
        });
    }

    match name.strip_suffix(SYMLINK_SUFFIX) {
        Some(path) if path.is_empty() || path.ends_with('/') => Err(EntryError::ReservedName {
            name: name.to_owned(),
        }),
        Some(path) => Ok(StoredName {
            kind: StoredKind::SymlinkMarker,
            path,
        }),
        None => Ok(StoredName {
            kind: StoredKind::File,
            path: name,
        }),
    }
}

/// The ZIP entry name for `entry`.
///
/// Files and directories whose own name ends in the symlink suffix can't be
/// told apart from markers on the way back out, so they're rejected.
pub fn encode(entry: &Entry) -> Result<String, EntryError> {
    match &entry.kind {
        EntryKind::Symlink { .. } => Ok(format!("{}{}", entry.path, SYMLINK_SUFFIX)),
        _ if entry.path.ends_with(SYMLINK_SUFFIX) => Err(EntryError::ReservedName {
            name: entry.path.clone(),
        }),
        EntryKind::Directory => Ok(format!("{}/", entry.path)),
        EntryKind::File { .. } => Ok(entry.path.clone()),
    }
}

/// Logical path of a source node relative to the archive root, `/`-separated.
pub fn relative_key(relative: &Path) -> Result<String, EntryError> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => match part.to_str() {
                Some(part) => parts.push(part),
                None => return Err(EntryError::NonUtf8Path(relative.to_owned())),
            },
            Component::CurDir => {}
            _ => return Err(EntryError::UnsafePath(relative.display().to_string())),
        }
    }
    Ok(parts.join("/"))
}
