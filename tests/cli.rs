use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

/// Build the reference tree: two confirmed artifacts, one context-confirmed
/// `target`, and two look-alikes that must survive every run.
fn setup_test_directory() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();

    fs::create_dir_all(root.join("proj/node_modules")).unwrap();
    fs::write(root.join("proj/node_modules/index.js"), "module.exports = {}").unwrap();

    fs::create_dir_all(root.join("proj/ios/Pods")).unwrap();
    fs::write(root.join("proj/ios/Pods/Manifest.lock"), "PODS:").unwrap();

    fs::create_dir_all(root.join("proj/ios/NotPods")).unwrap();
    fs::write(root.join("proj/ios/NotPods/keep.txt"), "precious").unwrap();

    // No Cargo.toml sibling: must never be touched
    fs::create_dir_all(root.join("proj/backend/target")).unwrap();
    fs::write(root.join("proj/backend/target/keep.bin"), "precious").unwrap();

    fs::create_dir_all(root.join("proj/rustcrate/target")).unwrap();
    fs::write(root.join("proj/rustcrate/Cargo.toml"), "[package]").unwrap();
    fs::write(root.join("proj/rustcrate/target/debug.bin"), "compiled").unwrap();

    dir
}

#[test]
fn test_dry_run_lists_but_deletes_nothing() {
    let dir = setup_test_directory();

    let mut cmd = Command::cargo_bin("reclaim").unwrap();
    cmd.arg(dir.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("node_modules"))
        .stdout(predicate::str::contains("Pods"))
        .stdout(predicate::str::contains("rustcrate"))
        .stdout(predicate::str::contains("Dry run: nothing was deleted."));

    // Everything, matched or not, must still exist
    assert!(dir.path().join("proj/node_modules").exists());
    assert!(dir.path().join("proj/ios/Pods").exists());
    assert!(dir.path().join("proj/rustcrate/target").exists());
    assert!(dir.path().join("proj/ios/NotPods").exists());
    assert!(dir.path().join("proj/backend/target").exists());
}

#[test]
fn test_yes_deletes_matches_and_spares_lookalikes() {
    let dir = setup_test_directory();

    let mut cmd = Command::cargo_bin("reclaim").unwrap();
    cmd.arg(dir.path())
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Freed"));

    assert!(!dir.path().join("proj/node_modules").exists());
    assert!(!dir.path().join("proj/ios/Pods").exists());
    assert!(!dir.path().join("proj/rustcrate/target").exists());

    assert!(dir.path().join("proj/ios/NotPods/keep.txt").exists());
    assert!(dir.path().join("proj/backend/target/keep.bin").exists());
    assert!(dir.path().join("proj/rustcrate/Cargo.toml").exists());
}

#[test]
fn test_declined_prompt_deletes_nothing() {
    let dir = setup_test_directory();

    let mut cmd = Command::cargo_bin("reclaim").unwrap();
    cmd.arg(dir.path())
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."));

    assert!(dir.path().join("proj/node_modules").exists());
    assert!(dir.path().join("proj/ios/Pods").exists());
    assert!(dir.path().join("proj/rustcrate/target").exists());
}

#[test]
fn test_accepted_prompt_deletes() {
    let dir = setup_test_directory();

    let mut cmd = Command::cargo_bin("reclaim").unwrap();
    cmd.arg(dir.path())
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Freed"));

    assert!(!dir.path().join("proj/node_modules").exists());
}

#[test]
fn test_nothing_found() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();

    let mut cmd = Command::cargo_bin("reclaim").unwrap();
    cmd.arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No removable build artifacts found."));
}

#[test]
fn test_missing_root_fails() {
    let mut cmd = Command::cargo_bin("reclaim").unwrap();
    cmd.arg("/definitely/not/a/real/path")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn test_file_as_root_fails() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("a-file");
    fs::write(&file, "not a directory").unwrap();

    let mut cmd = Command::cargo_bin("reclaim").unwrap();
    cmd.arg(&file)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("is not a directory"));
}
