use std::time::Instant;

use crate::{Record, RecordId, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Start (or restart) loading the full launch list.
    ReloadRequested,
    /// Engine finished a list fetch.
    RecordsLoaded {
        request_id: RequestId,
        records: Vec<Record>,
    },
    /// Engine list fetch failed; `message` is user-facing.
    RecordsFailed {
        request_id: RequestId,
        message: String,
    },
    /// Restore favorites loaded from persisted storage at startup.
    FavoritesRestored(Vec<RecordId>),
    /// User clicked the star on a card or in the detail overlay.
    FavoriteToggled { id: RecordId },
    /// User edited the search box (raw, not yet debounced).
    SearchChanged { text: String, at: Instant },
    /// User picked a year; `None` means all years.
    YearSelected(Option<String>),
    SuccessOnlyChanged(bool),
    FavoritesOnlyChanged(bool),
    /// User picked a page number from the page bar.
    PageRequested(usize),
    NextPage,
    PreviousPage,
    /// User opened the detail overlay for a loaded record.
    RecordSelected { id: RecordId },
    /// User asked for a single record by id, fetched fresh from the API.
    LookupRequested { id: RecordId },
    LookupResolved {
        request_id: RequestId,
        record: Option<Record>,
    },
    LookupFailed {
        request_id: RequestId,
        message: String,
    },
    /// Overlay dismissed (close control, overlay click or Escape).
    DetailClosed,
    /// Timer tick; commits debounced search text.
    Tick { now: Instant },
}
