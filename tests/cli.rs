use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn too_few_arguments_prints_usage() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("pzip")?;
    cmd.arg("only-one");
    cmd.assert().success().stdout(
        predicate::str::contains("Usage").and(predicate::str::contains("archiveName")),
    );

    let mut cmd = Command::cargo_bin("punzip")?;
    cmd.assert().success().stdout(
        predicate::str::contains("Usage")
            .and(predicate::str::contains("destinationDirectory")),
    );
    Ok(())
}

#[test]
fn archive_then_extract() -> Result<(), Box<dyn std::error::Error>> {
    let source_dir = tempdir()?;
    fs::create_dir(source_dir.path().join("nested"))?;
    fs::write(source_dir.path().join("file1.txt"), b"Hello, this is the first file.")?;
    fs::write(source_dir.path().join("nested/data.bin"), [0u8, 1, 2, 3])?;

    let work_dir = tempdir()?;
    let archive_path = work_dir.path().join("test_archive.zip");

    let mut cmd = Command::cargo_bin("pzip")?;
    cmd.arg(source_dir.path()).arg(&archive_path);
    cmd.assert().success().stdout(
        predicate::str::contains("Archived: ")
            .and(predicate::str::contains("file1.txt"))
            .and(predicate::str::contains("data.bin")),
    );
    assert!(archive_path.exists());

    let extract_dir = work_dir.path().join("out");
    let mut cmd = Command::cargo_bin("punzip")?;
    cmd.arg(&archive_path).arg(&extract_dir);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Extracted: "));

    assert_eq!(
        fs::read(extract_dir.join("file1.txt"))?,
        b"Hello, this is the first file."
    );
    assert_eq!(fs::read(extract_dir.join("nested/data.bin"))?, [0u8, 1, 2, 3]);
    Ok(())
}

#[cfg(unix)]
#[test]
fn symlinks_are_announced() -> Result<(), Box<dyn std::error::Error>> {
    let source_dir = tempdir()?;
    fs::write(source_dir.path().join("target.txt"), b"t")?;
    std::os::unix::fs::symlink("target.txt", source_dir.path().join("link"))?;

    let work_dir = tempdir()?;
    let archive_path = work_dir.path().join("links.zip");
    Command::cargo_bin("pzip")?
        .arg(source_dir.path())
        .arg(&archive_path)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Archived (symlink): ")
                .and(predicate::str::contains("-> target.txt")),
        );

    Command::cargo_bin("punzip")?
        .arg(&archive_path)
        .arg(work_dir.path().join("out"))
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Extracted (symlink): ")
                .and(predicate::str::contains("-> target.txt")),
        );
    Ok(())
}

#[test]
fn missing_source_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let work_dir = tempdir()?;
    let archive_path = work_dir.path().join("never.zip");

    let mut cmd = Command::cargo_bin("pzip")?;
    cmd.arg(work_dir.path().join("ghost")).arg(&archive_path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("neither a file nor a directory"));
    assert!(!archive_path.exists());
    Ok(())
}

#[test]
fn missing_archive_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let work_dir = tempdir()?;
    let extract_dir = work_dir.path().join("out");

    let mut cmd = Command::cargo_bin("punzip")?;
    cmd.arg(work_dir.path().join("ghost.zip")).arg(&extract_dir);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open ZIP file"));
    assert!(!extract_dir.exists());
    Ok(())
}

#[test]
fn entry_failures_go_to_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let source_dir = tempdir()?;
    fs::write(source_dir.path().join("fine.txt"), b"fine")?;
    fs::write(source_dir.path().join("bad.symlink"), b"bad")?;

    let work_dir = tempdir()?;
    let archive_path = work_dir.path().join("partial.zip");
    let mut cmd = Command::cargo_bin("pzip")?;
    cmd.arg(source_dir.path()).arg(&archive_path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("fine.txt"))
        .stderr(
            predicate::str::contains("Failed to archive")
                .and(predicate::str::contains("reserved symlink suffix")),
        );
    Ok(())
}
