use crate::{RecordId, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchAll { request_id: RequestId },
    FetchOne { request_id: RequestId, id: RecordId },
    /// Rewrite persisted favorites with the full, current set.
    PersistFavorites { ids: Vec<RecordId> },
}
