//! Explorer core: launch records, filter/paginate pipeline and the pure
//! state machine driving the views.
mod debounce;
mod effect;
mod favorites;
mod filter;
mod msg;
mod pagination;
mod record;
mod state;
mod update;
mod view_model;

pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use effect::Effect;
pub use favorites::{FavoritesDecodeError, FavoritesSet, FAVORITES_STORAGE_KEY};
pub use filter::{apply_filters, distinct_years, FilterCriteria};
pub use msg::Msg;
pub use pagination::{
    clamp_page, page_window, paginate, total_pages, Page, DEFAULT_PAGE_RADIUS, DEFAULT_PAGE_SIZE,
};
pub use record::{parse_utc_timestamp, Outcome, Record, RecordId, RecordLinks, UNKNOWN_ROCKET};
pub use state::{AppState, Detail, LoadStatus, RequestId, ViewSettings};
pub use update::update;
pub use view_model::{
    AppViewModel, CardView, DetailView, FilterBarView, PaginationView, RecordDetailView,
    ViewStatus,
};
