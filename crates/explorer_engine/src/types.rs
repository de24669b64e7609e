use std::fmt;

use explorer_core::{Record, RecordId, RequestId};

/// Message shown to the user for any failed launch fetch.
pub const FETCH_FAILED_MESSAGE: &str = "Unable to fetch launches from SpaceX API";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    AllFetched {
        request_id: RequestId,
        result: Result<Vec<Record>, FetchError>,
    },
    OneFetched {
        request_id: RequestId,
        id: RecordId,
        result: Result<Option<Record>, FetchError>,
    },
}

/// A failed fetch. Carries a failure category and a user-facing message,
/// never response content.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({kind})")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind) -> Self {
        Self {
            kind,
            message: FETCH_FAILED_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
