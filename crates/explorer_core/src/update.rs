use engine_logging::{engine_debug, engine_info};

use crate::{AppState, Detail, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ReloadRequested => {
            let request_id = state.begin_fetch();
            vec![Effect::FetchAll { request_id }]
        }
        Msg::RecordsLoaded {
            request_id,
            records,
        } => {
            if state.is_current_fetch(request_id) {
                engine_info!("Applying {} records from request {}", records.len(), request_id);
                state.apply_records(records);
            } else {
                engine_debug!("Discarding stale records from request {}", request_id);
            }
            Vec::new()
        }
        Msg::RecordsFailed {
            request_id,
            message,
        } => {
            if state.is_current_fetch(request_id) {
                state.apply_fetch_failure(message);
            } else {
                engine_debug!("Discarding stale failure from request {}", request_id);
            }
            Vec::new()
        }
        Msg::FavoritesRestored(ids) => {
            state.restore_favorites(ids);
            Vec::new()
        }
        Msg::FavoriteToggled { id } => {
            if id.is_empty() {
                return (state, Vec::new());
            }
            state.toggle_favorite(&id);
            vec![Effect::PersistFavorites {
                ids: state.favorites().ids_sorted(),
            }]
        }
        Msg::SearchChanged { text, at } => {
            state.set_search_input(text, at);
            Vec::new()
        }
        Msg::Tick { now } => {
            state.commit_search(now);
            Vec::new()
        }
        Msg::YearSelected(year) => {
            state.set_year(year);
            Vec::new()
        }
        Msg::SuccessOnlyChanged(enabled) => {
            state.set_success_only(enabled);
            Vec::new()
        }
        Msg::FavoritesOnlyChanged(enabled) => {
            state.set_favorites_only(enabled);
            Vec::new()
        }
        Msg::PageRequested(page) => {
            state.go_to_page(page);
            Vec::new()
        }
        Msg::NextPage => {
            let next = state.page().saturating_add(1);
            state.go_to_page(next);
            Vec::new()
        }
        Msg::PreviousPage => {
            let previous = state.page().saturating_sub(1);
            state.go_to_page(previous);
            Vec::new()
        }
        Msg::RecordSelected { id } => {
            if !state.select_record(&id) {
                engine_debug!("Ignoring selection of unknown record {}", id);
            }
            Vec::new()
        }
        Msg::LookupRequested { id } => {
            let id = id.trim().to_owned();
            if id.is_empty() {
                return (state, Vec::new());
            }
            let request_id = state.begin_lookup(id.clone());
            vec![Effect::FetchOne { request_id, id }]
        }
        Msg::LookupResolved { request_id, record } => {
            match state.pending_lookup(request_id) {
                Some(id) => {
                    let detail = match record {
                        Some(record) => Detail::Record(record),
                        None => Detail::NotFound { id },
                    };
                    state.set_detail(Some(detail));
                }
                None => engine_debug!("Discarding stale lookup {}", request_id),
            }
            Vec::new()
        }
        Msg::LookupFailed {
            request_id,
            message,
        } => {
            match state.pending_lookup(request_id) {
                Some(id) => state.set_detail(Some(Detail::Failed { id, message })),
                None => engine_debug!("Discarding stale lookup failure {}", request_id),
            }
            Vec::new()
        }
        Msg::DetailClosed => {
            state.set_detail(None);
            Vec::new()
        }
    };

    (state, effects)
}
