use std::fs::{self, File};
use std::io::{self, BufReader, Read, Seek};
use std::path::Path;

use zip::ZipArchive;
use zip::read::ZipFile;

use crate::error::{ArchiveError, EntryError};
use crate::platform::{self, NativePermissions, PermissionCapability};

use super::codec;
use super::entry::{Entry, EntryKind};
use super::report::{Action, Report};

/// Recreates a directory tree from a ZIP archive.
pub struct Extractor<P = NativePermissions> {
    permissions: P,
}

impl Extractor {
    pub fn new() -> Self {
        Self::with_permissions(NativePermissions::default())
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PermissionCapability> Extractor<P> {
    pub fn with_permissions(permissions: P) -> Self {
        Self { permissions }
    }

    /// Extract every entry of `archive_path` under `destination`.
    ///
    /// The archive is opened before `destination` is created, so an
    /// unreadable archive leaves nothing behind.
    ///
    /// # Errors
    ///
    /// Fails if the archive can't be opened or the destination directory
    /// can't be created. Failures on individual entries are recorded in the
    /// returned [`Report`].
    pub fn extract(&self, archive_path: &Path, destination: &Path) -> Result<Report, ArchiveError> {
        let file =
            File::open(archive_path).map_err(|e| ArchiveError::unreadable(archive_path, e))?;
        let mut archive = ZipArchive::new(BufReader::new(file))
            .map_err(|e| ArchiveError::unreadable(archive_path, e))?;

        fs::create_dir_all(destination).map_err(|source| ArchiveError::DestinationUnwritable {
            path: destination.to_owned(),
            source,
        })?;

        if !self.permissions.is_supported() {
            log::warn!("POSIX permissions are not supported here; stored modes are ignored");
        }

        let mut report = Report::default();
        for index in 0..archive.len() {
            self.extract_entry(&mut archive, index, destination, &mut report);
        }
        Ok(report)
    }

    fn extract_entry<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        index: usize,
        destination: &Path,
        report: &mut Report,
    ) {
        let mut file = match archive.by_index(index) {
            Ok(file) => file,
            Err(e) => {
                let key = format!("#{}", index);
                let err = EntryError::zip("Failed to read entry", key.as_str(), e);
                report.push(destination.join(&key), Err(err));
                return;
            }
        };

        let name = file.name().to_owned();
        let stored = match codec::decode(&name, file.is_dir()) {
            Ok(stored) => stored,
            Err(e) => {
                report.push(destination.join(&name), Err(e));
                return;
            }
        };
        let relative = match stored
            .enclosed_path()
            .and_then(|relative| check_ancestors(destination, &relative).map(|_| relative))
        {
            Ok(relative) => relative,
            Err(e) => {
                report.push(destination.join(&name), Err(e));
                return;
            }
        };
        let target = destination.join(relative);

        let mode = file.unix_mode();
        let outcome = read_payload(&mut file, &name)
            .map(|payload| stored.into_entry(payload, mode))
            .and_then(|entry| self.materialize(&target, entry));
        report.push(target, outcome);
    }

    fn materialize(&self, target: &Path, entry: Entry) -> Result<Action, EntryError> {
        match entry.kind {
            EntryKind::Directory => {
                fs::create_dir_all(target)
                    .map_err(|e| EntryError::io("Failed to create directory", target, e))?;
                Ok(Action::Directory)
            }
            EntryKind::File {
                contents,
                permissions,
            } => {
                create_parent(target)?;
                remove_existing(target)?;
                fs::write(target, &contents)
                    .map_err(|e| EntryError::io("Failed to write", target, e))?;
                if let Some(permissions) = permissions {
                    self.permissions
                        .apply(target, permissions)
                        .map_err(|e| EntryError::io("Failed to set permissions on", target, e))?;
                }
                Ok(Action::Extracted)
            }
            EntryKind::Symlink { target: link_target } => {
                create_parent(target)?;
                platform::create_symlink(&link_target, target).map_err(|e| {
                    if e.kind() == io::ErrorKind::Unsupported {
                        EntryError::SymlinkUnsupported(target.to_owned())
                    } else {
                        EntryError::io("Failed to create link", target, e)
                    }
                })?;
                Ok(Action::ExtractedSymlink {
                    target: link_target,
                })
            }
        }
    }
}

fn read_payload(file: &mut ZipFile<'_>, name: &str) -> Result<Vec<u8>, EntryError> {
    let mut payload = Vec::new();
    file.read_to_end(&mut payload)
        .map_err(|e| EntryError::zip("Failed to read", name, e.into()))?;
    Ok(payload)
}

fn create_parent(path: &Path) -> Result<(), EntryError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .map_err(|e| EntryError::io("Failed to create directory", parent, e)),
        _ => Ok(()),
    }
}

/// Refuse entries whose parent directories pass through a symlink, such as
/// one created earlier in the same run.
fn check_ancestors(destination: &Path, relative: &Path) -> Result<(), EntryError> {
    let mut current = destination.to_path_buf();
    let mut components = relative.components().peekable();
    while let Some(component) = components.next() {
        if components.peek().is_none() {
            break;
        }
        current.push(component);
        match fs::symlink_metadata(&current) {
            Ok(meta) if meta.file_type().is_symlink() => {
                return Err(EntryError::UnsafePath(relative.display().to_string()));
            }
            Ok(_) => {}
            // Nothing further down exists yet.
            Err(_) => break,
        }
    }
    Ok(())
}

/// Files replace whatever non-directory is in the way: a read-only file or a
/// symlink is unlinked rather than opened for writing.
fn remove_existing(path: &Path) -> Result<(), EntryError> {
    match fs::symlink_metadata(path) {
        Ok(meta) if !meta.is_dir() => {
            fs::remove_file(path).map_err(|e| EntryError::io("Failed to replace", path, e))
        }
        _ => Ok(()),
    }
}
