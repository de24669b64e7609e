use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

/// Rocket label used when a launch carries no populated rocket object.
pub const UNKNOWN_ROCKET: &str = "Unknown Rocket";

pub type RecordId = String;

/// Tri-state launch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Succeeded,
    Failed,
    Pending,
}

impl Outcome {
    pub fn from_success(success: Option<bool>) -> Self {
        match success {
            Some(true) => Outcome::Succeeded,
            Some(false) => Outcome::Failed,
            None => Outcome::Pending,
        }
    }

    /// Badge text shown next to a launch name.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Succeeded => "Success",
            Outcome::Failed => "Failure",
            Outcome::Pending => "TBD",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordLinks {
    pub patch_small: Option<String>,
    pub patch_large: Option<String>,
    pub wikipedia: Option<String>,
    pub webcast: Option<String>,
    pub article: Option<String>,
}

impl RecordLinks {
    /// Large patch if present, otherwise the small one.
    pub fn patch(&self) -> Option<&str> {
        self.patch_large
            .as_deref()
            .or(self.patch_small.as_deref())
    }

    /// External reference links in display order, skipping absent ones.
    pub fn external(&self) -> Vec<(&'static str, &str)> {
        [
            ("Wikipedia", self.wikipedia.as_deref()),
            ("Webcast", self.webcast.as_deref()),
            ("Article", self.article.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.map(|url| (label, url)))
        .collect()
    }
}

/// A normalized launch as shown in the list and detail views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub date_utc: String,
    pub outcome: Outcome,
    pub details: Option<String>,
    pub rocket_name: String,
    pub links: RecordLinks,
}

impl Record {
    pub fn launched_at(&self) -> Option<DateTime<Utc>> {
        parse_utc_timestamp(&self.date_utc)
    }

    /// Calendar year of the launch in UTC.
    pub fn launch_year(&self) -> Option<i32> {
        self.launched_at().map(|at| at.year())
    }
}

/// Parses an ISO-8601 timestamp into UTC.
///
/// Accepts RFC 3339 with any offset, a date-time without offset (taken as
/// UTC) and a bare date.
pub fn parse_utc_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
