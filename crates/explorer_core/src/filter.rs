use std::collections::BTreeSet;

use crate::{FavoritesSet, Outcome, Record};

/// Committed filter inputs, combined by logical AND.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub query: String,
    pub year: Option<String>,
    pub success_only: bool,
    pub favorites_only: bool,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.year.is_none()
            && !self.success_only
            && !self.favorites_only
    }
}

/// Distinct launch years, newest first. Records with unparsable dates are skipped.
pub fn distinct_years(records: &[Record]) -> Vec<String> {
    let years: BTreeSet<i32> = records.iter().filter_map(Record::launch_year).collect();
    years.into_iter().rev().map(|year| year.to_string()).collect()
}

/// Stable filter: surviving records keep their input order.
pub fn apply_filters<'a>(
    records: &'a [Record],
    favorites: &FavoritesSet,
    criteria: &FilterCriteria,
) -> Vec<&'a Record> {
    let query = criteria.query.trim().to_lowercase();
    records
        .iter()
        .filter(|record| matches(record, favorites, criteria, &query))
        .collect()
}

fn matches(
    record: &Record,
    favorites: &FavoritesSet,
    criteria: &FilterCriteria,
    normalized_query: &str,
) -> bool {
    let matches_search =
        normalized_query.is_empty() || record.name.to_lowercase().contains(normalized_query);
    let matches_year = match criteria.year.as_deref() {
        Some(year) => record
            .launch_year()
            .is_some_and(|launch_year| launch_year.to_string() == year),
        None => true,
    };
    let matches_success = !criteria.success_only || record.outcome == Outcome::Succeeded;
    let matches_favorite = !criteria.favorites_only || favorites.is_favorite(&record.id);

    matches_search && matches_year && matches_success && matches_favorite
}
