use std::path::Path;

use engine_logging::{engine_error, engine_info};
use explorer_core::RecordId;
use explorer_engine::{FavoritesStore, FileKeyValueStore};

pub(crate) type AppFavoritesStore = FavoritesStore<FileKeyValueStore>;

pub(crate) fn open_favorites(data_dir: &Path) -> AppFavoritesStore {
    let store = FavoritesStore::load(FileKeyValueStore::new(data_dir.to_path_buf()));
    engine_info!(
        "Favorites storage at {:?} holds {} ids",
        data_dir,
        store.all().len()
    );
    store
}

pub(crate) fn save_favorites(store: &mut AppFavoritesStore, ids: Vec<RecordId>) {
    if let Err(err) = store.replace(ids) {
        engine_error!(
            "Failed to write favorites to {:?}: {}",
            store.storage().dir(),
            err
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_favorites_are_reloaded() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut store = open_favorites(temp.path());
        assert!(store.all().is_empty());

        save_favorites(&mut store, vec!["alpha-id".to_string()]);
        let reopened = open_favorites(temp.path());
        assert!(reopened.is_favorite("alpha-id"));
    }

    #[test]
    fn write_failure_keeps_in_memory_set() {
        let temp = tempfile::TempDir::new().unwrap();
        let not_a_dir = temp.path().join("file");
        std::fs::write(&not_a_dir, "x").unwrap();

        let mut store = open_favorites(&not_a_dir);
        save_favorites(&mut store, vec!["alpha-id".to_string()]);
        assert!(store.is_favorite("alpha-id"));
    }
}
