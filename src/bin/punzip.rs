//! Extractor entry point.
//!
//! Extracts a ZIP file into a directory, restoring stored permissions and
//! turning `.symlink` entries back into symbolic links.

use anyhow::{Context, Result};
use clap::Parser;

use posix_zip::cli::{self, ExtractCli};

fn main() -> Result<()> {
    let args = ExtractCli::parse();
    cli::init_logging()?;

    let Some((archive, destination)) = args.paths() else {
        println!("{}", ExtractCli::usage());
        return Ok(());
    };

    let report = posix_zip::extract(archive, destination)
        .with_context(|| format!("Couldn't extract {}", archive.display()))?;
    cli::print_report(&report, "extract");
    Ok(())
}
