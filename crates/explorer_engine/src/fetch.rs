use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use explorer_core::Record;
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::{json, Value};

use crate::normalize::parse_query_response;
use crate::{FailureKind, FetchError};

pub const DEFAULT_ENDPOINT: &str = "https://api.spacexdata.com/v4/launches/query";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 20 * 1024 * 1024,
        }
    }
}

/// Every launch, newest first, with the rocket document embedded.
pub fn all_launches_query() -> Value {
    json!({
        "query": {},
        "options": {
            "sort": { "date_utc": "desc" },
            "populate": ["rocket"],
            "pagination": false,
        },
    })
}

pub fn single_launch_query(id: &str) -> Value {
    json!({
        "query": { "_id": id },
        "options": {
            "populate": ["rocket"],
            "limit": 1,
        },
    })
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// All launches. Either every record or an error, never a partial list.
    async fn fetch_all(&self) -> Result<Vec<Record>, FetchError>;

    /// One launch by id; `Ok(None)` when nothing matches.
    async fn fetch_one(&self, id: &str) -> Result<Option<Record>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| {
                engine_warn!("Failed to build HTTP client: {}", err);
                FetchError::new(FailureKind::Network)
            })
    }

    async fn post_query(&self, body: &Value) -> Result<Vec<Record>, FetchError> {
        let url = reqwest::Url::parse(&self.settings.endpoint).map_err(|err| {
            engine_warn!("Invalid endpoint {}: {}", self.settings.endpoint, err);
            FetchError::new(FailureKind::InvalidUrl)
        })?;
        let client = self.build_client()?;

        engine_debug!("POST {} body={}", url, body);
        let response = client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body.to_string())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            engine_warn!("Query endpoint answered {}", status);
            return Err(FetchError::new(FailureKind::HttpStatus(status.as_u16())));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(FailureKind::TooLarge {
                    max_bytes: self.settings.max_bytes,
                    actual: Some(content_len),
                }));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(FailureKind::TooLarge {
                    max_bytes: self.settings.max_bytes,
                    actual: Some(next_len),
                }));
            }
            bytes.extend_from_slice(&chunk);
        }

        parse_query_response(&bytes).map_err(|err| {
            engine_warn!("Failed to decode query response ({} bytes): {}", bytes.len(), err);
            FetchError::new(FailureKind::Decode)
        })
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch_all(&self) -> Result<Vec<Record>, FetchError> {
        self.post_query(&all_launches_query()).await
    }

    async fn fetch_one(&self, id: &str) -> Result<Option<Record>, FetchError> {
        let records = self.post_query(&single_launch_query(id)).await?;
        Ok(records.into_iter().find(|record| record.id == id))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    engine_warn!("Query request failed: {}", err);
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout);
    }
    FetchError::new(FailureKind::Network)
}
