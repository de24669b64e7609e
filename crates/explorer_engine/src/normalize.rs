//! Raw launch documents as returned by the query endpoint, and their
//! mapping into [`Record`].

use explorer_core::{Outcome, Record, RecordLinks, UNKNOWN_ROCKET};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub docs: Vec<RawLaunch>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLaunch {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub date_utc: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub details: Option<String>,
    #[serde(default)]
    pub rocket: Option<RawRocket>,
    #[serde(default, deserialize_with = "lenient")]
    pub links: Option<RawLinks>,
}

/// `rocket` is an id string unless the query populated it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawRocket {
    Populated {
        #[serde(default)]
        name: Option<String>,
    },
    Reference(String),
    Other(IgnoredAny),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLinks {
    #[serde(default, deserialize_with = "lenient")]
    pub patch: Option<RawPatch>,
    #[serde(default, deserialize_with = "lenient")]
    pub wikipedia: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub webcast: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub article: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPatch {
    #[serde(default, deserialize_with = "lenient")]
    pub small: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub large: Option<String>,
}

/// Optional field that reads as `None` when the value has the wrong shape,
/// so one odd field never rejects the whole response.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value::<Option<T>>(value).ok().flatten())
}

pub fn normalize_launch(raw: RawLaunch) -> Record {
    let rocket_name = match raw.rocket {
        Some(RawRocket::Populated { name: Some(name) }) if !name.is_empty() => name,
        _ => UNKNOWN_ROCKET.to_string(),
    };
    let links = raw.links.unwrap_or_default();
    let patch = links.patch.unwrap_or_default();

    Record {
        id: raw.id,
        name: raw.name,
        date_utc: raw.date_utc.unwrap_or_default(),
        outcome: Outcome::from_success(raw.success),
        details: raw.details,
        rocket_name,
        links: RecordLinks {
            patch_small: patch.small,
            patch_large: patch.large,
            wikipedia: links.wikipedia,
            webcast: links.webcast,
            article: links.article,
        },
    }
}

/// Decodes a query response body into records, preserving server order.
pub fn parse_query_response(body: &[u8]) -> Result<Vec<Record>, serde_json::Error> {
    let response: QueryResponse = serde_json::from_slice(body)?;
    Ok(response.docs.into_iter().map(normalize_launch).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(doc: serde_json::Value) -> Record {
        let body = serde_json::json!({ "docs": [doc] }).to_string();
        let mut records = parse_query_response(body.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        records.remove(0)
    }

    #[test]
    fn populated_rocket_name_is_used() {
        let record = parse_one(serde_json::json!({
            "id": "a", "name": "A", "date_utc": "2020-01-01T00:00:00.000Z",
            "success": true, "details": null,
            "rocket": { "id": "r1", "name": "Falcon 9" },
            "links": {}
        }));
        assert_eq!(record.rocket_name, "Falcon 9");
        assert_eq!(record.outcome, Outcome::Succeeded);
    }

    #[test]
    fn missing_or_unpopulated_rocket_falls_back() {
        let shapes = [
            serde_json::json!({ "id": "a", "name": "A" }),
            serde_json::json!({ "id": "a", "name": "A", "rocket": null }),
            serde_json::json!({ "id": "a", "name": "A", "rocket": "5e9d0d95eda69973a809d1ec" }),
            serde_json::json!({ "id": "a", "name": "A", "rocket": {} }),
            serde_json::json!({ "id": "a", "name": "A", "rocket": { "name": "" } }),
            serde_json::json!({ "id": "a", "name": "A", "rocket": { "name": null } }),
            serde_json::json!({ "id": "a", "name": "A", "rocket": 42 }),
        ];
        for shape in shapes {
            let record = parse_one(shape.clone());
            assert_eq!(record.rocket_name, UNKNOWN_ROCKET, "shape {shape}");
        }
    }

    #[test]
    fn links_default_to_none_at_every_level() {
        let record = parse_one(serde_json::json!({ "id": "a", "name": "A" }));
        assert_eq!(record.links, RecordLinks::default());
        assert_eq!(record.outcome, Outcome::Pending);
        assert_eq!(record.details, None);

        let record = parse_one(serde_json::json!({
            "id": "a", "name": "A",
            "links": { "patch": null, "wikipedia": "https://en.wikipedia.org/wiki/A" }
        }));
        assert_eq!(record.links.patch_small, None);
        assert_eq!(record.links.patch_large, None);
        assert_eq!(
            record.links.wikipedia.as_deref(),
            Some("https://en.wikipedia.org/wiki/A")
        );

        let record = parse_one(serde_json::json!({
            "id": "a", "name": "A",
            "links": { "patch": { "small": "s.png" } }
        }));
        assert_eq!(record.links.patch_small.as_deref(), Some("s.png"));
        assert_eq!(record.links.patch_large, None);
    }

    #[test]
    fn wrongly_typed_optional_fields_read_as_none() {
        let body = serde_json::json!({ "docs": [
            {
                "id": "a", "name": "A",
                "details": { "x": 1 },
                "success": "yes",
                "links": { "patch": "oops", "wikipedia": 5, "article": "https://a" }
            },
            { "id": "b", "name": "B", "links": { "patch": { "small": 3, "large": "l.png" } } },
            { "id": "c", "name": "C", "links": [1, 2] },
        ]})
        .to_string();

        let records = parse_query_response(body.as_bytes()).unwrap();
        let ids: Vec<&str> = records.iter().map(|record| record.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);

        assert_eq!(records[0].details, None);
        assert_eq!(records[0].outcome, Outcome::Pending);
        assert_eq!(records[0].links.patch_small, None);
        assert_eq!(records[0].links.wikipedia, None);
        assert_eq!(records[0].links.article.as_deref(), Some("https://a"));

        assert_eq!(records[1].links.patch_small, None);
        assert_eq!(records[1].links.patch_large.as_deref(), Some("l.png"));

        assert_eq!(records[2].links, RecordLinks::default());
    }

    #[test]
    fn whitespace_rocket_name_is_kept() {
        let record = parse_one(serde_json::json!({
            "id": "a", "name": "A", "rocket": { "name": " " }
        }));
        assert_eq!(record.rocket_name, " ");
    }

    #[test]
    fn body_without_docs_is_an_error() {
        assert!(parse_query_response(br#"{"items": []}"#).is_err());
        assert!(parse_query_response(b"<html></html>").is_err());
    }
}
