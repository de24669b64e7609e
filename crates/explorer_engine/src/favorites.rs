use engine_logging::{engine_debug, engine_info, engine_warn};
use explorer_core::{FavoritesSet, RecordId, FAVORITES_STORAGE_KEY};

use crate::persist::PersistError;
use crate::storage::KeyValueStore;

/// Favorites set backed by storage. Every mutation rewrites the stored array.
pub struct FavoritesStore<S: KeyValueStore> {
    storage: S,
    favorites: FavoritesSet,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Loads favorites best-effort: unreadable or malformed storage yields an
    /// empty set.
    pub fn load(storage: S) -> Self {
        let favorites = match storage.read(FAVORITES_STORAGE_KEY) {
            Ok(Some(raw)) if raw.trim().is_empty() => FavoritesSet::new(),
            Ok(Some(raw)) => match FavoritesSet::from_json(&raw) {
                Ok(favorites) => {
                    engine_info!("Loaded {} favorites", favorites.len());
                    favorites
                }
                Err(err) => {
                    engine_warn!("Failed to parse persisted favorites: {}", err);
                    FavoritesSet::new()
                }
            },
            Ok(None) => FavoritesSet::new(),
            Err(err) => {
                engine_warn!("Failed to read persisted favorites: {}", err);
                FavoritesSet::new()
            }
        };
        Self { storage, favorites }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.is_favorite(id)
    }

    /// Flips membership and persists. The in-memory set is updated even if
    /// the write fails.
    pub fn toggle(&mut self, id: &str) -> Result<bool, PersistError> {
        let now_favorite = self.favorites.toggle(id);
        self.persist()?;
        Ok(now_favorite)
    }

    /// Replaces the whole set and persists it.
    pub fn replace<I>(&mut self, ids: I) -> Result<(), PersistError>
    where
        I: IntoIterator<Item = RecordId>,
    {
        self.favorites = FavoritesSet::from_ids(ids);
        self.persist()
    }

    pub fn all(&self) -> &FavoritesSet {
        &self.favorites
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) -> Result<(), PersistError> {
        let payload = self.favorites.to_json();
        engine_debug!("Persisting {} favorites", self.favorites.len());
        self.storage.write(FAVORITES_STORAGE_KEY, &payload)
    }
}
