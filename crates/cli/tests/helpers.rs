use std::fs;
use std::path::Path;

use function_fleet::resolve_directory;
use tempfile::tempdir;

#[test]
fn resolve_directory_keeps_absolute_paths() {
    let tmp = tempdir().expect("tempdir");
    let resolved = resolve_directory(&tmp.path().to_string_lossy()).expect("resolve");
    assert_eq!(resolved, tmp.path());
}

#[test]
fn resolve_directory_handles_relative_paths() {
    // Both relative cases share one test because they depend on the process
    // working directory.
    let original = std::env::current_dir().expect("cwd");
    let tmp = tempdir().expect("tempdir");
    let existing = tmp.path().join("configs");
    fs::create_dir_all(&existing).expect("create configs dir");
    std::env::set_current_dir(tmp.path()).expect("chdir tmp");

    // An existing relative directory canonicalizes.
    let resolved = resolve_directory("configs").expect("resolve existing");
    assert_eq!(resolved, existing.canonicalize().expect("canonicalize configs"));

    // A missing relative directory resolves against the working directory
    // without being created.
    let resolved = resolve_directory("not-there").expect("resolve missing");
    assert!(resolved.is_absolute());
    assert_eq!(resolved.file_name().and_then(|n| n.to_str()), Some("not-there"));
    assert!(!Path::new("not-there").exists());

    std::env::set_current_dir(original).expect("restore cwd");
}
