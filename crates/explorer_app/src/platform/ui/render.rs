use std::fmt::Write;

use explorer_core::{
    parse_utc_timestamp, AppViewModel, CardView, DetailView, FilterBarView, PaginationView,
    RecordDetailView, ViewStatus,
};

use super::constants::{
    ALL_YEARS_LABEL, APP_TAGLINE, APP_TITLE, EMPTY_MESSAGE, IDLE_MESSAGE, LOADING_MESSAGE,
    NO_DETAILS_MESSAGE, NO_PATCH_MESSAGE, RULE_WIDTH,
};

/// Renders the whole screen for one view model.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{APP_TITLE}");
    let _ = writeln!(out, "{APP_TAGLINE}");
    let _ = writeln!(out, "{rule}");
    render_filters(&mut out, &view.filters, view.favorites_count);
    let _ = writeln!(out);

    match &view.status {
        ViewStatus::Idle => {
            let _ = writeln!(out, "{IDLE_MESSAGE}");
        }
        ViewStatus::Loading => {
            let _ = writeln!(out, "{LOADING_MESSAGE}");
        }
        ViewStatus::Failed(message) => {
            let _ = writeln!(out, "Error: {message}");
        }
        ViewStatus::Ready => render_list(&mut out, view),
    }

    if let Some(detail) = &view.detail {
        let _ = writeln!(out);
        render_detail(&mut out, detail);
    }
    out
}

fn render_filters(out: &mut String, filters: &FilterBarView, favorites_count: usize) {
    let _ = write!(out, "Search: \"{}\"", filters.search_input);
    if filters.search_input != filters.active_query {
        let _ = write!(out, " (applying…)");
    }
    let _ = writeln!(out);

    let year = filters.selected_year.as_deref().unwrap_or(ALL_YEARS_LABEL);
    let _ = write!(out, "Year: {year}");
    if !filters.years.is_empty() {
        let _ = write!(out, "  [{}]", filters.years.join(" "));
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "{} Successful launches only   {} Favorites only ({favorites_count})",
        checkbox(filters.success_only),
        checkbox(filters.favorites_only),
    );
}

fn render_list(out: &mut String, view: &AppViewModel) {
    if view.cards.is_empty() {
        let _ = writeln!(out, "{EMPTY_MESSAGE}");
        return;
    }
    let _ = writeln!(out, "{} launches", view.total_matches);
    for (index, card) in view.cards.iter().enumerate() {
        render_card(out, index + 1, card);
    }
    if view.pagination.is_visible() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", pagination_bar(&view.pagination));
    }
}

fn render_card(out: &mut String, position: usize, card: &CardView) {
    let star = if card.is_favorite { '★' } else { '☆' };
    let _ = writeln!(
        out,
        "{position:>3}. {star} {}  [{}]",
        card.name,
        card.outcome.label()
    );
    let _ = writeln!(
        out,
        "       {}  ·  Rocket: {}",
        format_launch_date(&card.date_utc),
        card.rocket_name
    );
}

pub fn pagination_bar(pagination: &PaginationView) -> String {
    let previous = if pagination.has_previous {
        "« Previous"
    } else {
        "  (Previous)"
    };
    let next = if pagination.has_next {
        "Next »"
    } else {
        "(Next)"
    };
    let pages: Vec<String> = pagination
        .window
        .iter()
        .map(|page| {
            if *page == pagination.current {
                format!("[{page}]")
            } else {
                page.to_string()
            }
        })
        .collect();
    format!("{previous}  {}  {next}", pages.join(" "))
}

fn render_detail(out: &mut String, detail: &DetailView) {
    let rule = "-".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{rule}");
    match detail {
        DetailView::Record(record) => render_record_detail(out, record),
        DetailView::Loading { id } => {
            let _ = writeln!(out, "Loading launch {id}…");
        }
        DetailView::NotFound { id } => {
            let _ = writeln!(out, "No launch found with id {id}.");
        }
        DetailView::Failed { id, message } => {
            let _ = writeln!(out, "Could not load launch {id}: {message}");
        }
    }
    let _ = writeln!(out, "(close with: close | esc)");
    let _ = writeln!(out, "{rule}");
}

fn render_record_detail(out: &mut String, record: &RecordDetailView) {
    let star = if record.is_favorite { '★' } else { '☆' };
    let _ = writeln!(out, "{star} {}  [{}]", record.name, record.outcome.label());
    let _ = writeln!(out, "Rocket: {}", record.rocket_name);
    let _ = writeln!(out, "Launched: {}", format_launch_date(&record.date_utc));
    match &record.patch_url {
        Some(url) => {
            let _ = writeln!(out, "Patch: {url}");
        }
        None => {
            let _ = writeln!(out, "{NO_PATCH_MESSAGE}");
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}",
        record.details.as_deref().unwrap_or(NO_DETAILS_MESSAGE)
    );
    if !record.links.is_empty() {
        let _ = writeln!(out);
        for (label, url) in &record.links {
            let _ = writeln!(out, "{label}: {url}");
        }
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Medium date and short time in UTC, e.g. `Jan 1, 2020, 12:00 AM UTC`.
/// Unparsable input is shown as-is.
pub fn format_launch_date(date_utc: &str) -> String {
    match parse_utc_timestamp(date_utc) {
        Some(at) => at.format("%b %-d, %Y, %-I:%M %p UTC").to_string(),
        None => date_utc.to_string(),
    }
}
