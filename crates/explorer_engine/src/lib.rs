//! Explorer engine: launch fetching, record normalization and local persistence.
mod engine;
mod favorites;
mod fetch;
mod normalize;
mod persist;
mod storage;
mod types;

pub use engine::EngineHandle;
pub use favorites::FavoritesStore;
pub use fetch::{
    all_launches_query, single_launch_query, FetchSettings, Fetcher, ReqwestFetcher,
    DEFAULT_ENDPOINT,
};
pub use normalize::{
    normalize_launch, parse_query_response, QueryResponse, RawLaunch, RawLinks, RawPatch,
    RawRocket,
};
pub use persist::{ensure_data_dir, AtomicFileWriter, PersistError};
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use types::{EngineEvent, FailureKind, FetchError, FETCH_FAILED_MESSAGE};
