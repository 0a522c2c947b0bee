use std::error::Error;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use crate::zip::Report;

#[derive(Parser, Debug)]
#[command(name = "pzip")]
#[command(version)]
#[command(about = "Archive a file or directory into a ZIP file, keeping POSIX permissions and symlinks", long_about = None)]
#[command(after_help = "Examples:\n  \
  pzip project project.zip      archive the project directory\n  \
  pzip run.sh tools.zip         add run.sh to tools.zip, replacing any previous copy")]
pub struct ArchiveCli {
    /// File or directory to archive
    #[arg(value_name = "fileOrDirectoryToArchive")]
    pub source: Option<PathBuf>,

    /// ZIP file to create or update
    #[arg(value_name = "archiveName")]
    pub archive: Option<PathBuf>,
}

impl ArchiveCli {
    /// Both paths, or `None` if either is missing.
    pub fn paths(&self) -> Option<(&PathBuf, &PathBuf)> {
        self.source.as_ref().zip(self.archive.as_ref())
    }

    pub fn usage() -> String {
        Self::command().render_usage().to_string()
    }
}

#[derive(Parser, Debug)]
#[command(name = "punzip")]
#[command(version)]
#[command(about = "Extract a ZIP file, restoring POSIX permissions and symlinks", long_about = None)]
#[command(after_help = "Examples:\n  \
  punzip project.zip restored   extract project.zip into ./restored")]
pub struct ExtractCli {
    /// ZIP file to extract
    #[arg(value_name = "archiveFilePath")]
    pub archive: Option<PathBuf>,

    /// Directory to extract into (created if missing)
    #[arg(value_name = "destinationDirectory")]
    pub destination: Option<PathBuf>,
}

impl ExtractCli {
    /// Both paths, or `None` if either is missing.
    pub fn paths(&self) -> Option<(&PathBuf, &PathBuf)> {
        self.archive.as_ref().zip(self.destination.as_ref())
    }

    pub fn usage() -> String {
        Self::command().render_usage().to_string()
    }
}

/// Start logging to stderr. Warnings and errors only.
pub fn init_logging() -> anyhow::Result<()> {
    let mut errlog = stderrlog::new();
    errlog.verbosity(1);
    errlog.init()?;
    Ok(())
}

/// Print one status line per successful entry to stdout, and a diagnostic
/// with its cause chain per failed entry to stderr.
///
/// `verb` completes "Failed to ...", e.g. `"archive"`.
pub fn print_report(report: &Report, verb: &str) {
    for entry in &report.entries {
        match &entry.outcome {
            Ok(_) => {
                if let Some(line) = entry.status_line() {
                    println!("{}", line);
                }
            }
            Err(err) => {
                log::error!("Failed to {}: {}", verb, entry.path.display());
                log::error!("  {}", err);
                let mut source = err.source();
                while let Some(cause) = source {
                    log::error!("  caused by: {}", cause);
                    source = cause.source();
                }
            }
        }
    }
}
