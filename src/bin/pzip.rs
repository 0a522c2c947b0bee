//! Archiver entry point.
//!
//! Archives a file or directory tree into a ZIP file, storing POSIX
//! permissions and encoding symbolic links as `.symlink` entries.

use anyhow::{Context, Result};
use clap::Parser;

use posix_zip::cli::{self, ArchiveCli};

fn main() -> Result<()> {
    let args = ArchiveCli::parse();
    cli::init_logging()?;

    let Some((source, archive)) = args.paths() else {
        println!("{}", ArchiveCli::usage());
        return Ok(());
    };

    let report = posix_zip::archive(source, archive)
        .with_context(|| format!("Couldn't archive {}", source.display()))?;
    cli::print_report(&report, "archive");
    Ok(())
}
