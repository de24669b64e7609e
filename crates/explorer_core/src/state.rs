use std::time::{Duration, Instant};

use crate::debounce::{Debouncer, SEARCH_DEBOUNCE};
use crate::filter::{apply_filters, FilterCriteria};
use crate::pagination::{self, DEFAULT_PAGE_RADIUS, DEFAULT_PAGE_SIZE};
use crate::view_model::AppViewModel;
use crate::{FavoritesSet, Record, RecordId};

/// Identifies one fetch request so late results can be recognised.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
    Record(Record),
    Loading { id: RecordId, request_id: RequestId },
    NotFound { id: RecordId },
    Failed { id: RecordId, message: String },
}

/// Presentation settings that stay fixed for the lifetime of the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    pub page_size: usize,
    pub page_radius: usize,
    pub search_debounce: Duration,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_radius: DEFAULT_PAGE_RADIUS,
            search_debounce: SEARCH_DEBOUNCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    settings: ViewSettings,
    records: Vec<Record>,
    load: LoadStatus,
    fetch_generation: RequestId,
    lookup_generation: RequestId,
    favorites: FavoritesSet,
    search_input: String,
    search_debounce: Debouncer<String>,
    criteria: FilterCriteria,
    page: usize,
    detail: Option<Detail>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(ViewSettings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ViewSettings) -> Self {
        Self {
            settings: ViewSettings {
                page_size: settings.page_size.max(1),
                ..settings
            },
            records: Vec::new(),
            load: LoadStatus::Idle,
            fetch_generation: 0,
            lookup_generation: 0,
            favorites: FavoritesSet::new(),
            search_input: String::new(),
            search_debounce: Debouncer::new(settings.search_debounce),
            criteria: FilterCriteria::default(),
            page: 1,
            detail: None,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(self)
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn settings(&self) -> ViewSettings {
        self.settings
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load
    }

    pub fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn detail(&self) -> Option<&Detail> {
        self.detail.as_ref()
    }

    pub fn filtered(&self) -> Vec<&Record> {
        apply_filters(&self.records, &self.favorites, &self.criteria)
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.filtered().len(), self.settings.page_size)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn begin_fetch(&mut self) -> RequestId {
        self.fetch_generation += 1;
        self.load = LoadStatus::Loading;
        self.mark_dirty();
        self.fetch_generation
    }

    pub(crate) fn is_current_fetch(&self, request_id: RequestId) -> bool {
        request_id == self.fetch_generation && self.load == LoadStatus::Loading
    }

    pub(crate) fn apply_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.load = LoadStatus::Ready;
        self.clamp_page();
        self.mark_dirty();
    }

    pub(crate) fn apply_fetch_failure(&mut self, message: String) {
        self.load = LoadStatus::Failed(message);
        self.mark_dirty();
    }

    pub(crate) fn restore_favorites(&mut self, ids: Vec<RecordId>) {
        self.favorites = FavoritesSet::from_ids(ids);
        self.clamp_page();
        self.mark_dirty();
    }

    pub(crate) fn toggle_favorite(&mut self, id: &str) -> bool {
        let now_favorite = self.favorites.toggle(id);
        self.clamp_page();
        self.mark_dirty();
        now_favorite
    }

    pub(crate) fn set_search_input(&mut self, text: String, at: Instant) {
        self.search_input.clone_from(&text);
        self.search_debounce.push(text, at);
        self.mark_dirty();
    }

    /// Commits debounced search text. Returns true when the query changed.
    pub(crate) fn commit_search(&mut self, now: Instant) -> bool {
        match self.search_debounce.poll(now) {
            Some(query) if query != self.criteria.query => {
                self.criteria.query = query;
                self.reset_page();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn set_year(&mut self, year: Option<String>) -> bool {
        let year = year
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());
        if self.criteria.year == year {
            return false;
        }
        self.criteria.year = year;
        self.reset_page();
        true
    }

    pub(crate) fn set_success_only(&mut self, enabled: bool) -> bool {
        if self.criteria.success_only == enabled {
            return false;
        }
        self.criteria.success_only = enabled;
        self.reset_page();
        true
    }

    pub(crate) fn set_favorites_only(&mut self, enabled: bool) -> bool {
        if self.criteria.favorites_only == enabled {
            return false;
        }
        self.criteria.favorites_only = enabled;
        self.reset_page();
        true
    }

    /// Moves to `page`, clamped into the current page range.
    pub(crate) fn go_to_page(&mut self, page: usize) -> bool {
        let page = pagination::clamp_page(page, self.total_pages());
        if page == self.page {
            return false;
        }
        self.page = page;
        self.mark_dirty();
        true
    }

    pub(crate) fn select_record(&mut self, id: &str) -> bool {
        match self.records.iter().find(|record| record.id == id) {
            Some(record) => {
                self.detail = Some(Detail::Record(record.clone()));
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    pub(crate) fn begin_lookup(&mut self, id: RecordId) -> RequestId {
        self.lookup_generation += 1;
        self.detail = Some(Detail::Loading {
            id,
            request_id: self.lookup_generation,
        });
        self.mark_dirty();
        self.lookup_generation
    }

    /// Id of the in-flight lookup that `request_id` answers, if it is still wanted.
    pub(crate) fn pending_lookup(&self, request_id: RequestId) -> Option<RecordId> {
        match &self.detail {
            Some(Detail::Loading {
                id,
                request_id: pending,
            }) if *pending == request_id && request_id == self.lookup_generation => {
                Some(id.clone())
            }
            _ => None,
        }
    }

    pub(crate) fn set_detail(&mut self, detail: Option<Detail>) {
        if self.detail != detail {
            self.detail = detail;
            self.mark_dirty();
        }
    }

    fn reset_page(&mut self) {
        self.page = 1;
        self.mark_dirty();
    }

    fn clamp_page(&mut self) {
        self.page = pagination::clamp_page(self.page, self.total_pages());
    }
}
