use std::fmt;
use std::path::PathBuf;

use crate::error::EntryError;

/// What happened to an entry that was processed successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A directory was recorded in the archive or created on disk.
    Directory,
    Archived,
    ArchivedSymlink { target: PathBuf },
    Extracted,
    ExtractedSymlink { target: PathBuf },
}

/// Outcome for a single entry.
#[derive(Debug)]
pub struct EntryReport {
    /// The filesystem path the entry was read from (archiving) or written to
    /// (extraction).
    pub path: PathBuf,
    pub outcome: Result<Action, EntryError>,
}

impl EntryReport {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The status line for a successful entry, if it gets one.
    ///
    /// Directories are silent.
    pub fn status_line(&self) -> Option<StatusLine<'_>> {
        let (label, target) = match self.outcome.as_ref().ok()? {
            Action::Directory => return None,
            Action::Archived => ("Archived", None),
            Action::ArchivedSymlink { target } => ("Archived (symlink)", Some(target)),
            Action::Extracted => ("Extracted", None),
            Action::ExtractedSymlink { target } => ("Extracted (symlink)", Some(target)),
        };
        Some(StatusLine {
            label,
            path: &self.path,
            target,
        })
    }
}

/// Displays as `Archived: <path>`, `Extracted (symlink): <path> -> <target>`, etc.
pub struct StatusLine<'a> {
    label: &'static str,
    path: &'a PathBuf,
    target: Option<&'a PathBuf>,
}

impl fmt::Display for StatusLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.path.display())?;
        if let Some(target) = self.target {
            write!(f, " -> {}", target.display())?;
        }
        Ok(())
    }
}

/// Per-entry results of a run, in processing order.
#[derive(Debug, Default)]
pub struct Report {
    pub entries: Vec<EntryReport>,
}

impl Report {
    pub(crate) fn push(&mut self, path: impl Into<PathBuf>, outcome: Result<Action, EntryError>) {
        let path = path.into();
        match &outcome {
            Ok(action) => log::debug!("{}: {:?}", path.display(), action),
            Err(e) => log::debug!("{}: {}", path.display(), e),
        }
        self.entries.push(EntryReport { path, outcome });
    }

    pub fn successes(&self) -> impl Iterator<Item = &EntryReport> {
        self.entries.iter().filter(|e| e.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&PathBuf, &EntryError)> {
        self.entries
            .iter()
            .filter_map(|e| e.outcome.as_ref().err().map(|err| (&e.path, err)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}
