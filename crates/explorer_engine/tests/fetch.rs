use std::time::Duration;

use explorer_core::{Outcome, UNKNOWN_ROCKET};
use explorer_engine::{
    all_launches_query, single_launch_query, FailureKind, FetchSettings, Fetcher, ReqwestFetcher,
    FETCH_FAILED_MESSAGE,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUERY_PATH: &str = "/v4/launches/query";

fn sample_docs() -> serde_json::Value {
    json!({
        "docs": [
            {
                "id": "launch-gamma",
                "name": "Mission Gamma",
                "date_utc": "2022-09-15T15:30:00.000Z",
                "success": null,
                "details": "Gamma mission details.",
                "rocket": { "id": "r3", "name": "Starship" },
                "links": {
                    "patch": { "small": "https://images/gamma-small.png", "large": null },
                    "wikipedia": null,
                    "webcast": "https://example.com/gamma-webcast",
                    "article": null
                }
            },
            {
                "id": "launch-alpha",
                "name": "Mission Alpha",
                "date_utc": "2020-01-01T00:00:00.000Z",
                "success": true,
                "details": null,
                "rocket": "5e9d0d95eda69973a809d1ec",
                "links": {}
            }
        ],
        "totalDocs": 2
    })
}

fn fetcher_for(server: &MockServer) -> ReqwestFetcher {
    ReqwestFetcher::new(FetchSettings {
        endpoint: format!("{}{}", server.uri(), QUERY_PATH),
        ..FetchSettings::default()
    })
}

#[tokio::test]
async fn fetch_all_posts_query_and_normalizes_docs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(body_json(all_launches_query()))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_docs()))
        .expect(1)
        .mount(&server)
        .await;

    let records = fetcher_for(&server).fetch_all().await.expect("fetch ok");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "launch-gamma");
    assert_eq!(records[0].rocket_name, "Starship");
    assert_eq!(records[0].outcome, Outcome::Pending);
    assert_eq!(records[0].links.patch(), Some("https://images/gamma-small.png"));
    assert_eq!(
        records[0].links.webcast.as_deref(),
        Some("https://example.com/gamma-webcast")
    );
    assert_eq!(records[1].id, "launch-alpha");
    assert_eq!(records[1].rocket_name, UNKNOWN_ROCKET);
    assert_eq!(records[1].outcome, Outcome::Succeeded);
    assert_eq!(records[1].details, None);
}

#[tokio::test]
async fn fetch_all_fails_on_http_status_without_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream exploded: secret"))
        .mount(&server)
        .await;

    let err = fetcher_for(&server).fetch_all().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(err.message, FETCH_FAILED_MESSAGE);
    assert!(!err.to_string().contains("secret"));
}

#[tokio::test]
async fn fetch_all_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = fetcher_for(&server).fetch_all().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn fetch_all_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(sample_docs()),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings {
        endpoint: format!("{}{}", server.uri(), QUERY_PATH),
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    });

    let err = fetcher.fetch_all().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetch_all_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"docs": []}"#))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings {
        endpoint: format!("{}{}", server.uri(), QUERY_PATH),
        max_bytes: 4,
        ..FetchSettings::default()
    });

    let err = fetcher.fetch_all().await.unwrap_err();
    assert!(matches!(
        err.kind,
        FailureKind::TooLarge { max_bytes: 4, .. }
    ));
}

#[tokio::test]
async fn invalid_endpoint_is_reported() {
    let fetcher = ReqwestFetcher::new(FetchSettings {
        endpoint: "not a url".to_string(),
        ..FetchSettings::default()
    });
    let err = fetcher.fetch_all().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn fetch_one_returns_matching_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(body_json(single_launch_query("launch-gamma")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [sample_docs()["docs"][0].clone()]
        })))
        .mount(&server)
        .await;

    let record = fetcher_for(&server)
        .fetch_one("launch-gamma")
        .await
        .expect("fetch ok")
        .expect("record present");
    assert_eq!(record.name, "Mission Gamma");
}

#[tokio::test]
async fn fetch_one_without_match_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "docs": [] })))
        .mount(&server)
        .await;

    let result = fetcher_for(&server).fetch_one("nope").await;
    assert_eq!(result, Ok(None));
}
