use std::collections::HashSet;

use serde_json::Value;

/// Storage key under which the favorites array is persisted.
pub const FAVORITES_STORAGE_KEY: &str = "spacex:favorites";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FavoritesDecodeError {
    #[error("favorites payload is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("favorites payload is not a JSON array")]
    NotAnArray,
}

/// User-curated set of favorited record identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FavoritesSet {
    ids: HashSet<String>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Decodes the persisted JSON array. Non-string elements are dropped.
    pub fn from_json(raw: &str) -> Result<Self, FavoritesDecodeError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|err| FavoritesDecodeError::InvalidJson(err.to_string()))?;
        let Value::Array(items) = value else {
            return Err(FavoritesDecodeError::NotAnArray);
        };
        Ok(Self::from_ids(items.into_iter().filter_map(|item| match item {
            Value::String(id) => Some(id),
            _ => None,
        })))
    }

    /// Sorted JSON array so repeated writes of the same set are byte-identical.
    pub fn to_json(&self) -> String {
        Value::from(self.ids_sorted()).to_string()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Flips membership of `id` and returns whether it is now a favorite.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_owned());
            true
        }
    }

    pub fn all(&self) -> &HashSet<String> {
        &self.ids
    }

    pub fn ids_sorted(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
