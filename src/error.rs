//! Error types for archive and extraction runs.
//!
//! Errors come in two tiers:
//!
//! - [`ArchiveError`] aborts the whole run (the archive can't be opened or
//!   created, the source or destination is unusable).
//! - [`EntryError`] belongs to a single entry. It is recorded in the
//!   [`Report`](crate::zip::Report) and the run moves on to the next entry.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use zip::result::ZipError;

/// A failure that stops an archive or extraction run.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The path to archive is neither a directory nor a regular file.
    #[error("Source path is neither a file nor a directory: {}", .0.display())]
    InvalidSource(PathBuf),

    /// The archive couldn't be created, or an existing one couldn't be
    /// opened for update.
    #[error("Failed to create or open ZIP file: {}", path.display())]
    ArchiveUncreatable {
        path: PathBuf,
        #[source]
        source: ZipError,
    },

    /// The archive to extract is missing or isn't a ZIP container.
    #[error("Failed to open ZIP file: {}", path.display())]
    ArchiveUnreadable {
        path: PathBuf,
        #[source]
        source: ZipError,
    },

    /// The extraction directory couldn't be created.
    #[error("Failed to create destination directory: {}", path.display())]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ArchiveError {
    pub(crate) fn uncreatable(path: impl Into<PathBuf>, source: impl Into<ZipError>) -> Self {
        ArchiveError::ArchiveUncreatable {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: impl Into<ZipError>) -> Self {
        ArchiveError::ArchiveUnreadable {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// A failure confined to one entry.
#[derive(Debug, Error)]
pub enum EntryError {
    /// Filesystem I/O on the entry failed.
    #[error("{action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The ZIP backend rejected the entry.
    #[error("{action} {key}")]
    Zip {
        action: &'static str,
        key: String,
        #[source]
        source: ZipError,
    },

    /// The name collides with the `.symlink` marker convention.
    #[error("{name} uses the reserved symlink suffix")]
    ReservedName { name: String },

    /// Archive keys must be UTF-8.
    #[error("Path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// FIFOs, sockets, devices and the like.
    #[error("Unsupported file type: {}", .0.display())]
    UnsupportedFileType(PathBuf),

    /// The entry would land outside the destination directory.
    #[error("Entry path escapes the destination: {0}")]
    UnsafePath(String),

    /// The platform can't create symbolic links.
    #[error("Symbolic links are not supported on this platform: {}", .0.display())]
    SymlinkUnsupported(PathBuf),
}

impl EntryError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        EntryError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn zip(action: &'static str, key: impl Into<String>, source: ZipError) -> Self {
        EntryError::Zip {
            action,
            key: key.into(),
            source,
        }
    }
}
