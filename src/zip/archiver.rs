use std::collections::HashSet;
use std::fs::{self, File, Metadata};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use walkdir::{DirEntry, WalkDir};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{ArchiveError, EntryError};
use crate::platform::{NativePermissions, PermissionCapability};

use super::codec;
use super::entry::{Entry, EntryKind, PermissionSet};
use super::report::{Action, Report};

/// Mode given to an archive that didn't exist before the run.
const NEW_ARCHIVE_MODE: u32 = 0o644;

/// Writes a file or directory tree into a ZIP archive.
pub struct Archiver<P = NativePermissions> {
    permissions: P,
}

impl Archiver {
    pub fn new() -> Self {
        Self::with_permissions(NativePermissions::default())
    }
}

impl Default for Archiver {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PermissionCapability> Archiver<P> {
    pub fn with_permissions(permissions: P) -> Self {
        Self { permissions }
    }

    /// Archive `source` into `archive_path`.
    ///
    /// A directory source is stored recursively relative to itself; a regular
    /// file is stored under its base name. Entries already in the archive are
    /// kept unless this run writes something at the same path.
    ///
    /// # Errors
    ///
    /// Fails without touching the archive if `source` is neither a directory
    /// nor a regular file, or if the archive can't be opened or written.
    /// Failures on individual entries are recorded in the returned [`Report`].
    pub fn archive(&self, source: &Path, archive_path: &Path) -> Result<Report, ArchiveError> {
        let metadata = match fs::metadata(source) {
            Ok(m) if m.is_dir() || m.is_file() => m,
            _ => return Err(ArchiveError::InvalidSource(source.to_owned())),
        };

        if !self.permissions.is_supported() {
            log::warn!("POSIX permissions are not supported here; entries are stored without them");
        }

        let mut writer = ArchiveWriter::create(archive_path, &self.permissions)?;
        let mut report = Report::default();

        if metadata.is_dir() {
            self.archive_tree(source, &mut writer, &mut report);
        } else {
            let outcome = self.archive_single(source, &metadata, &mut writer);
            report.push(source, outcome);
        }

        writer.finish()?;
        Ok(report)
    }

    fn archive_tree(&self, root: &Path, writer: &mut ArchiveWriter, report: &mut Report) {
        let mut walker = WalkDir::new(root).min_depth(1).into_iter();
        while let Some(item) = walker.next() {
            let item = match item {
                Ok(item) => item,
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    let err = EntryError::io("Failed to read", &path, e.into());
                    report.push(path, Err(err));
                    continue;
                }
            };

            if writer.is_own_file(&item) {
                log::debug!("Skipping the archive itself: {}", item.path().display());
                continue;
            }

            let outcome = self.archive_node(root, &item, writer);
            if outcome.is_err() && item.file_type().is_dir() {
                walker.skip_current_dir();
            }
            report.push(item.path(), outcome);
        }
    }

    fn archive_node(
        &self,
        root: &Path,
        item: &DirEntry,
        writer: &mut ArchiveWriter,
    ) -> Result<Action, EntryError> {
        let path = item.path();
        let relative = path
            .strip_prefix(root)
            .map_err(|_| EntryError::UnsafePath(path.display().to_string()))?;
        let key = codec::relative_key(relative)?;
        let file_type = item.file_type();

        if file_type.is_symlink() {
            let target =
                fs::read_link(path).map_err(|e| EntryError::io("Failed to read link", path, e))?;
            writer.write(&Entry::symlink(key, target.clone()))?;
            Ok(Action::ArchivedSymlink { target })
        } else if file_type.is_dir() {
            writer.write(&Entry::directory(key))?;
            Ok(Action::Directory)
        } else if file_type.is_file() {
            let metadata = item
                .metadata()
                .map_err(|e| EntryError::io("Failed to stat", path, e.into()))?;
            writer.write(&self.read_file(path, key, &metadata)?)?;
            Ok(Action::Archived)
        } else {
            Err(EntryError::UnsupportedFileType(path.to_owned()))
        }
    }

    fn archive_single(
        &self,
        source: &Path,
        metadata: &Metadata,
        writer: &mut ArchiveWriter,
    ) -> Result<Action, EntryError> {
        let name = source
            .file_name()
            .ok_or_else(|| EntryError::UnsafePath(source.display().to_string()))?;
        let key = codec::relative_key(Path::new(name))?;
        writer.write(&self.read_file(source, key, metadata)?)?;
        Ok(Action::Archived)
    }

    /// Contents are read up front so a failed read never leaves a truncated
    /// entry in the archive.
    fn read_file(
        &self,
        path: &Path,
        key: String,
        metadata: &Metadata,
    ) -> Result<Entry, EntryError> {
        let contents = fs::read(path).map_err(|e| EntryError::io("Failed to read", path, e))?;
        Ok(Entry::file(key, contents, self.permissions.read(metadata)))
    }
}

/// The archive being built: a temporary file next to the destination,
/// persisted over it by [`finish`](Self::finish).
struct ArchiveWriter {
    path: PathBuf,
    zip: ZipWriter<NamedTempFile>,
    existing: Option<ZipArchive<File>>,
    /// Logical paths written during this run.
    written: HashSet<String>,
    /// Canonical paths of the temporary file and the existing archive.
    own_files: Vec<PathBuf>,
}

impl ArchiveWriter {
    fn create(path: &Path, permissions: &impl PermissionCapability) -> Result<Self, ArchiveError> {
        let existing = match File::open(path) {
            Ok(file) => {
                Some(ZipArchive::new(file).map_err(|e| ArchiveError::uncreatable(path, e))?)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(ArchiveError::uncreatable(path, e)),
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = tempfile::Builder::new()
            .prefix(".pzip-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| ArchiveError::uncreatable(path, e))?;

        if existing.is_some() {
            let current = fs::metadata(path).map_err(|e| ArchiveError::uncreatable(path, e))?;
            fs::set_permissions(temp.path(), current.permissions())
                .map_err(|e| ArchiveError::uncreatable(path, e))?;
        } else {
            permissions
                .apply(temp.path(), PermissionSet::from_mode(NEW_ARCHIVE_MODE))
                .map_err(|e| ArchiveError::uncreatable(path, e))?;
        }

        let own_files = [temp.path(), path]
            .iter()
            .filter_map(|p| fs::canonicalize(p).ok())
            .collect();

        Ok(Self {
            path: path.to_owned(),
            zip: ZipWriter::new(temp),
            existing,
            written: HashSet::new(),
            own_files,
        })
    }

    fn is_own_file(&self, item: &DirEntry) -> bool {
        let same_name = self
            .own_files
            .iter()
            .any(|own| own.file_name() == Some(item.file_name()));
        same_name
            && fs::canonicalize(item.path())
                .map(|p| self.own_files.contains(&p))
                .unwrap_or(false)
    }

    fn write(&mut self, entry: &Entry) -> Result<(), EntryError> {
        let key = codec::encode(entry)?;
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        match &entry.kind {
            EntryKind::Directory => {
                self.zip
                    .add_directory(key.as_str(), options)
                    .map_err(|e| EntryError::zip("Failed to add directory", &key, e))?;
                self.written.insert(entry.path.clone());
            }
            EntryKind::File {
                contents,
                permissions,
            } => {
                let options = match permissions {
                    Some(p) => options.unix_permissions(p.mode()),
                    None => options,
                };
                self.write_file(&entry.path, &key, options, contents)?;
            }
            EntryKind::Symlink { target } => {
                let payload = crate::platform::target_to_bytes(target);
                self.write_file(&entry.path, &key, options, &payload)?;
            }
        }
        Ok(())
    }

    fn write_file(
        &mut self,
        logical: &str,
        key: &str,
        options: FileOptions,
        contents: &[u8],
    ) -> Result<(), EntryError> {
        self.zip
            .start_file(key, options)
            .map_err(|e| EntryError::zip("Failed to add", key, e))?;
        self.written.insert(logical.to_owned());
        self.zip
            .write_all(contents)
            .map_err(|e| EntryError::zip("Failed to write", key, e.into()))
    }

    /// Carry over untouched entries from the previous archive, then replace it.
    fn finish(self) -> Result<(), ArchiveError> {
        let Self {
            path,
            mut zip,
            existing,
            written,
            ..
        } = self;

        if let Some(mut existing) = existing {
            for i in 0..existing.len() {
                let file = existing
                    .by_index_raw(i)
                    .map_err(|e| ArchiveError::uncreatable(&path, e))?;
                let logical = codec::decode(file.name(), file.is_dir())
                    .map(|n| n.path.to_owned())
                    .unwrap_or_else(|_| file.name().to_owned());
                if written.contains(&logical) {
                    log::debug!("Replacing {}", file.name());
                    continue;
                }
                zip.raw_copy_file(file)
                    .map_err(|e| ArchiveError::uncreatable(&path, e))?;
            }
        }

        let temp = zip.finish().map_err(|e| ArchiveError::uncreatable(&path, e))?;
        temp.persist(&path)
            .map_err(|e| ArchiveError::uncreatable(&path, e.error))?;
        Ok(())
    }
}
