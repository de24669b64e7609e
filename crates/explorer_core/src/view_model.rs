use crate::filter::distinct_years;
use crate::pagination::{page_window, paginate};
use crate::{AppState, Detail, LoadStatus, Outcome, Record, RecordId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewStatus {
    #[default]
    Idle,
    Loading,
    Failed(String),
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterBarView {
    /// Raw text in the search box, ahead of the debounced query.
    pub search_input: String,
    pub active_query: String,
    pub years: Vec<String>,
    pub selected_year: Option<String>,
    pub success_only: bool,
    pub favorites_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: RecordId,
    pub name: String,
    pub date_utc: String,
    pub outcome: Outcome,
    pub rocket_name: String,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaginationView {
    pub current: usize,
    pub total_pages: usize,
    pub window: Vec<usize>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PaginationView {
    /// The page bar is hidden when everything fits on one page.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDetailView {
    pub id: RecordId,
    pub name: String,
    pub date_utc: String,
    pub outcome: Outcome,
    pub rocket_name: String,
    pub patch_url: Option<String>,
    pub details: Option<String>,
    pub links: Vec<(String, String)>,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    Record(RecordDetailView),
    Loading { id: RecordId },
    NotFound { id: RecordId },
    Failed { id: RecordId, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub status: ViewStatus,
    pub filters: FilterBarView,
    /// Cards on the current page; empty unless `status` is `Ready`.
    pub cards: Vec<CardView>,
    pub total_matches: usize,
    pub pagination: PaginationView,
    pub detail: Option<DetailView>,
    pub favorites_count: usize,
}

impl AppViewModel {
    pub(crate) fn build(state: &AppState) -> Self {
        let settings = state.settings();
        let criteria = state.criteria();
        let favorites = state.favorites();

        let filtered = state.filtered();
        let page = paginate(&filtered, state.page(), settings.page_size);

        let status = match state.load_status() {
            LoadStatus::Idle => ViewStatus::Idle,
            LoadStatus::Loading => ViewStatus::Loading,
            LoadStatus::Failed(message) => ViewStatus::Failed(message.clone()),
            LoadStatus::Ready => ViewStatus::Ready,
        };

        let cards = if status == ViewStatus::Ready {
            page.items
                .iter()
                .map(|record| CardView {
                    id: record.id.clone(),
                    name: record.name.clone(),
                    date_utc: record.date_utc.clone(),
                    outcome: record.outcome,
                    rocket_name: record.rocket_name.clone(),
                    is_favorite: favorites.is_favorite(&record.id),
                })
                .collect()
        } else {
            Vec::new()
        };

        let detail = state.detail().map(|detail| match detail {
            Detail::Record(record) => {
                DetailView::Record(detail_view(record, favorites.is_favorite(&record.id)))
            }
            Detail::Loading { id, .. } => DetailView::Loading { id: id.clone() },
            Detail::NotFound { id } => DetailView::NotFound { id: id.clone() },
            Detail::Failed { id, message } => DetailView::Failed {
                id: id.clone(),
                message: message.clone(),
            },
        });

        Self {
            status,
            filters: FilterBarView {
                search_input: state.search_input().to_owned(),
                active_query: criteria.query.clone(),
                years: distinct_years(state.records()),
                selected_year: criteria.year.clone(),
                success_only: criteria.success_only,
                favorites_only: criteria.favorites_only,
            },
            cards,
            total_matches: filtered.len(),
            pagination: PaginationView {
                current: page.page,
                total_pages: page.total_pages,
                window: page_window(page.page, page.total_pages, settings.page_radius),
                has_previous: page.page > 1,
                has_next: page.page < page.total_pages,
            },
            detail,
            favorites_count: favorites.len(),
        }
    }
}

fn detail_view(record: &Record, is_favorite: bool) -> RecordDetailView {
    RecordDetailView {
        id: record.id.clone(),
        name: record.name.clone(),
        date_utc: record.date_utc.clone(),
        outcome: record.outcome,
        rocket_name: record.rocket_name.clone(),
        patch_url: record.links.patch().map(ToOwned::to_owned),
        details: record.details.clone(),
        links: record
            .links
            .external()
            .into_iter()
            .map(|(label, url)| (label.to_owned(), url.to_owned()))
            .collect(),
        is_favorite,
    }
}
