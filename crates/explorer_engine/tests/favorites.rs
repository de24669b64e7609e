use std::fs;

use explorer_core::FAVORITES_STORAGE_KEY;
use explorer_engine::{FavoritesStore, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
use tempfile::TempDir;

fn stored_ids(store: &FavoritesStore<MemoryKeyValueStore>) -> Vec<String> {
    let raw = store
        .storage()
        .get(FAVORITES_STORAGE_KEY)
        .expect("favorites written");
    let mut ids: Vec<String> = serde_json::from_str(raw).unwrap();
    ids.sort();
    ids
}

#[test]
fn toggle_writes_storage_after_each_mutation() {
    engine_logging::initialize_for_tests();
    let mut store = FavoritesStore::load(MemoryKeyValueStore::new());
    assert!(store.all().is_empty());

    assert!(store.toggle("alpha-id").unwrap());
    assert!(store.is_favorite("alpha-id"));
    assert_eq!(stored_ids(&store), vec!["alpha-id"]);

    assert!(store.toggle("beta-id").unwrap());
    assert_eq!(stored_ids(&store), vec!["alpha-id", "beta-id"]);

    assert!(!store.toggle("alpha-id").unwrap());
    assert!(!store.toggle("beta-id").unwrap());
    assert!(store.all().is_empty());
    assert!(stored_ids(&store).is_empty());
}

#[test]
fn malformed_payloads_load_as_empty() {
    engine_logging::initialize_for_tests();
    for payload in [r#"{"alpha-id": true}"#, "not json", "42", "\"alpha-id\"", ""] {
        let store = FavoritesStore::load(MemoryKeyValueStore::with_entry(
            FAVORITES_STORAGE_KEY,
            payload,
        ));
        assert!(store.all().is_empty(), "payload {payload:?}");
    }
}

#[test]
fn string_elements_survive_mixed_arrays() {
    let store = FavoritesStore::load(MemoryKeyValueStore::with_entry(
        FAVORITES_STORAGE_KEY,
        r#"["a", {"b": 1}, 7, "c"]"#,
    ));
    assert_eq!(store.all().ids_sorted(), vec!["a", "c"]);
}

#[test]
fn replace_rewrites_whole_set() {
    let mut store = FavoritesStore::load(MemoryKeyValueStore::with_entry(
        FAVORITES_STORAGE_KEY,
        r#"["old"]"#,
    ));
    store
        .replace(vec!["new-1".to_string(), "new-2".to_string()])
        .unwrap();
    assert!(!store.is_favorite("old"));
    assert_eq!(stored_ids(&store), vec!["new-1", "new-2"]);
}

#[test]
fn favorites_survive_reload_from_disk() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().to_path_buf();

    let mut store = FavoritesStore::load(FileKeyValueStore::new(dir.clone()));
    store.toggle("alpha-id").unwrap();
    drop(store);

    let reloaded = FavoritesStore::load(FileKeyValueStore::new(dir.clone()));
    assert!(reloaded.is_favorite("alpha-id"));

    let raw = fs::read_to_string(dir.join("spacex_favorites.json")).unwrap();
    assert_eq!(raw, r#"["alpha-id"]"#);
}

#[test]
fn unreadable_storage_loads_as_empty() {
    let temp = TempDir::new().unwrap();
    // A directory where the favorites file should be makes the read fail.
    let storage = FileKeyValueStore::new(temp.path().to_path_buf());
    fs::create_dir(storage.path_for(FAVORITES_STORAGE_KEY)).unwrap();
    assert!(storage.read(FAVORITES_STORAGE_KEY).is_err());

    let store = FavoritesStore::load(storage);
    assert!(store.all().is_empty());
}
