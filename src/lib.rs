//! # posix-zip
//!
//! Archive a file or directory tree into a ZIP file and extract it again,
//! keeping POSIX permission bits and symbolic links intact.
//!
//! ## Features
//!
//! - Recursive archiving of directory trees, or a single regular file
//! - File permissions stored in the ZIP's Unix attributes and restored on extraction
//! - Symbolic links stored as `<name>.symlink` entries holding the link target
//! - Updating an existing archive replaces entries at the same paths and keeps the rest
//! - Best-effort runs: a failing entry is reported and skipped
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let report = posix_zip::archive(Path::new("project"), Path::new("project.zip"))?;
//!     for (path, err) in report.failures() {
//!         eprintln!("{}: {}", path.display(), err);
//!     }
//!
//!     posix_zip::extract(Path::new("project.zip"), Path::new("restored"))?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod platform;
pub mod zip;

use std::path::Path;

pub use cli::{ArchiveCli, ExtractCli};
pub use error::{ArchiveError, EntryError};
pub use platform::{NativePermissions, NoPermissions, PermissionCapability};
pub use self::zip::{
    Action, Archiver, Entry, EntryKind, EntryReport, Extractor, PermissionSet, Report,
};

/// Archive `source` into `archive_path` with the platform's native permission support.
pub fn archive(source: &Path, archive_path: &Path) -> Result<Report, ArchiveError> {
    Archiver::new().archive(source, archive_path)
}

/// Extract `archive_path` into `destination` with the platform's native permission support.
pub fn extract(archive_path: &Path, destination: &Path) -> Result<Report, ArchiveError> {
    Extractor::new().extract(archive_path, destination)
}
