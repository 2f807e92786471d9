use std::fs;
use std::path::Path;

use predicates::str::contains;
use tempfile::tempdir;

fn read_descriptor(directory: &Path, index: u32) -> String {
    fs::read_to_string(directory.join(format!("namenode{index}.yaml"))).expect("read descriptor")
}

#[test]
fn generate_writes_one_descriptor_per_index() {
    let dir = tempdir().expect("tempdir");

    assert_cmd::cargo::cargo_bin_cmd!("function-fleet")
        .arg("generate")
        .arg("--directory")
        .arg(dir.path())
        .arg("--start")
        .arg("2")
        .arg("--end")
        .arg("5")
        .assert()
        .success()
        .stdout(contains("Generated 3 descriptor(s), skipped 0."));

    for index in 2..5u32 {
        let yaml = read_descriptor(dir.path(), index);
        assert!(yaml.contains(&format!("name: namenode{index}")));
        assert!(yaml.contains(&format!("value: namenode{index}")));
    }
    assert!(!dir.path().join("namenode5.yaml").exists());
}

#[test]
fn generate_uses_the_default_directory_under_the_working_directory() {
    let dir = tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("function-configurations")).expect("create default dir");

    assert_cmd::cargo::cargo_bin_cmd!("function-fleet")
        .current_dir(dir.path())
        .arg("generate")
        .arg("--start")
        .arg("0")
        .arg("--end")
        .arg("2")
        .assert()
        .success();

    assert!(dir.path().join("function-configurations/namenode0.yaml").exists());
    assert!(dir.path().join("function-configurations/namenode1.yaml").exists());
}

#[test]
fn generate_skips_existing_files_without_overwrite() {
    let dir = tempdir().expect("tempdir");
    let seeded = dir.path().join("namenode0.yaml");
    fs::write(&seeded, "seeded: content\n").expect("seed file");

    assert_cmd::cargo::cargo_bin_cmd!("function-fleet")
        .arg("generate")
        .arg("--directory")
        .arg(dir.path())
        .arg("--start")
        .arg("0")
        .arg("--end")
        .arg("2")
        .assert()
        .success()
        .stdout(contains("already exists and overwrite is disabled"))
        .stdout(contains("Generated 1 descriptor(s), skipped 1."));

    // The seeded file is untouched; the other index was generated.
    assert_eq!(fs::read_to_string(&seeded).expect("read seeded"), "seeded: content\n");
    assert!(read_descriptor(dir.path(), 1).contains("name: namenode1"));
}

#[test]
fn generate_overwrite_replaces_existing_content() {
    let dir = tempdir().expect("tempdir");
    let seeded = dir.path().join("namenode0.yaml");
    fs::write(&seeded, "seeded: content\n").expect("seed file");

    assert_cmd::cargo::cargo_bin_cmd!("function-fleet")
        .arg("generate")
        .arg("--directory")
        .arg(dir.path())
        .arg("--overwrite")
        .arg("--start")
        .arg("0")
        .arg("--end")
        .arg("1")
        .assert()
        .success();

    let yaml = read_descriptor(dir.path(), 0);
    assert!(!yaml.contains("seeded"));
    assert!(yaml.contains("name: namenode0"));
}

#[test]
fn generate_reports_an_empty_range_and_writes_nothing() {
    let dir = tempdir().expect("tempdir");

    assert_cmd::cargo::cargo_bin_cmd!("function-fleet")
        .arg("generate")
        .arg("--directory")
        .arg(dir.path())
        .arg("--start")
        .arg("3")
        .arg("--end")
        .arg("3")
        .assert()
        .success()
        .stdout(contains("Index range is empty"));

    assert_eq!(fs::read_dir(dir.path()).expect("read_dir").count(), 0);
}

#[test]
fn generate_fails_when_the_directory_is_missing() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("does-not-exist");

    assert_cmd::cargo::cargo_bin_cmd!("function-fleet")
        .arg("generate")
        .arg("--directory")
        .arg(&missing)
        .arg("--start")
        .arg("0")
        .arg("--end")
        .arg("1")
        .assert()
        .failure()
        .stderr(contains("Failed to write descriptor file"));
}

#[test]
fn generate_json_reports_each_file() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("namenode0.yaml"), "seeded: content\n").expect("seed file");

    let output = assert_cmd::cargo::cargo_bin_cmd!("function-fleet")
        .arg("generate")
        .arg("--directory")
        .arg(dir.path())
        .arg("--start")
        .arg("0")
        .arg("--end")
        .arg("2")
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let outcome: serde_json::Value = serde_json::from_slice(&output).expect("parse json");
    let files = outcome["files"].as_array().expect("files array");
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["unit"], "namenode0");
    assert_eq!(files[0]["action"], "skipped");
    assert_eq!(files[1]["unit"], "namenode1");
    assert_eq!(files[1]["action"], "written");
}
