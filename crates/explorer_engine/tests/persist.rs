use std::fs;

use explorer_engine::{ensure_data_dir, AtomicFileWriter, FileKeyValueStore, KeyValueStore};
use tempfile::TempDir;

#[test]
fn creates_missing_data_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("data");
    assert!(!new_dir.exists());
    ensure_data_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("favorites.json", "[]").unwrap();
    assert_eq!(first.file_name().unwrap(), "favorites.json");
    assert_eq!(fs::read_to_string(&first).unwrap(), "[]");

    let second = writer.write("favorites.json", r#"["a"]"#).unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), r#"["a"]"#);
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("favorites.json", "[]");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("favorites.json").exists());
}

#[test]
fn file_store_maps_keys_to_json_files() {
    let temp = TempDir::new().unwrap();
    let mut store = FileKeyValueStore::new(temp.path().join("state"));

    assert_eq!(store.read("spacex:favorites").unwrap(), None);

    store.write("spacex:favorites", r#"["x"]"#).unwrap();
    let expected = temp.path().join("state").join("spacex_favorites.json");
    assert_eq!(store.path_for("spacex:favorites"), expected);
    assert_eq!(fs::read_to_string(expected).unwrap(), r#"["x"]"#);
    assert_eq!(
        store.read("spacex:favorites").unwrap().as_deref(),
        Some(r#"["x"]"#)
    );
}
