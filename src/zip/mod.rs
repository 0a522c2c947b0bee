//! Archiving and extraction.
//!
//! ## Architecture
//!
//! - [`entry`]: the logical model. An [`Entry`] is a directory, a file with
//!   its permission bits, or a symbolic link with its target.
//! - [`codec`]: maps entries to ZIP entry names and back. Symbolic links are
//!   stored as `<name>.symlink` files holding the link target, since ZIP
//!   has no portable link type.
//! - [`archiver`] and [`extractor`]: single-pass walks over a source tree or
//!   an archive. Each entry is handled independently and its outcome is
//!   collected into a [`Report`].
//!
//! The container format itself is handled by the `zip` crate.
//!
//! ## Limitations
//!
//! - A regular file named `*.symlink` can't be archived.
//! - Directory permissions are not recorded.
//! - FIFOs, devices, sockets and hard links are not supported.

mod archiver;
pub mod codec;
mod entry;
mod extractor;
mod report;

pub use archiver::Archiver;
pub use entry::{Entry, EntryKind, PermissionSet};
pub use extractor::Extractor;
pub use report::{Action, EntryReport, Report, StatusLine};
