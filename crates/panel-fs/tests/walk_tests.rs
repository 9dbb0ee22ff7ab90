use assert_fs::prelude::*;
use panel_fs::{NormalizedPath, files_with_extension};
use pretty_assertions::assert_eq;

#[test]
fn test_missing_directory_is_empty() {
    let temp = assert_fs::TempDir::new().unwrap();
    let missing = NormalizedPath::new(temp.path().join("nope"));

    assert!(files_with_extension(&missing, &["rs"]).is_empty());
}

#[test]
fn test_recursive_listing_filters_extension() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("b.rs").write_str("").unwrap();
    temp.child("a.rs").write_str("").unwrap();
    temp.child("nested/c.RS").write_str("").unwrap();
    temp.child("notes.md").write_str("").unwrap();

    let root = NormalizedPath::new(temp.path());
    let names: Vec<String> = files_with_extension(&root, &["rs"])
        .iter()
        .map(|p| p.relative_to(&root).unwrap())
        .collect();

    assert_eq!(names, vec!["a.rs", "b.rs", "nested/c.RS"]);
}

#[test]
fn test_multiple_extensions() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("One.vue").write_str("").unwrap();
    temp.child("Two.tsx").write_str("").unwrap();
    temp.child("Three.css").write_str("").unwrap();

    let root = NormalizedPath::new(temp.path());
    let found = files_with_extension(&root, &["vue".to_string(), "tsx".to_string()]);

    assert_eq!(found.len(), 2);
}

#[test]
fn test_a_file_root_is_not_walked() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("single.rs");
    file.write_str("").unwrap();

    assert!(files_with_extension(&NormalizedPath::new(file.path()), &["rs"]).is_empty());
}
