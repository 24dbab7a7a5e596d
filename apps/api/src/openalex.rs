//! OpenAlex institution lookups.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use uni_map_core::{BackendRecord, MarkerId};

use crate::error::UpstreamError;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
/// Page size of the debug probe.
pub const DEBUG_PER_PAGE: u32 = 5;

/// Where institutions come from. Raw OpenAlex objects are returned so the
/// debug route can show their shape.
#[async_trait]
pub trait InstitutionSource: Send + Sync {
    async fn institutions(&self, per_page: u32) -> Result<Vec<Value>, UpstreamError>;
}

#[derive(Debug, Deserialize)]
struct InstitutionsPage {
    #[serde(default)]
    results: Vec<Value>,
}

pub struct OpenAlexClient {
    client: reqwest::Client,
    base_url: String,
    country_code: String,
}

impl OpenAlexClient {
    pub fn new(base_url: &str, country_code: &str) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            country_code: country_code.to_string(),
        })
    }

    fn url(&self, per_page: u32) -> String {
        format!(
            "{}/institutions?filter=country_code:{}&per_page={per_page}",
            self.base_url, self.country_code
        )
    }
}

#[async_trait]
impl InstitutionSource for OpenAlexClient {
    async fn institutions(&self, per_page: u32) -> Result<Vec<Value>, UpstreamError> {
        let url = self.url(per_page);
        debug!(%url, "querying OpenAlex");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let page: InstitutionsPage = response.json().await?;
        debug!(results = page.results.len(), "OpenAlex answered");
        Ok(page.results)
    }
}

/// Turns OpenAlex institutions into map records. Institutions without both
/// coordinates are skipped.
pub fn clean_institutions(results: &[Value]) -> Vec<BackendRecord> {
    results
        .iter()
        .filter_map(|item| {
            let geo = item.get("geo")?;
            let lat = coordinate(geo.get("latitude"))?;
            let lon = coordinate(geo.get("longitude"))?;

            let id = match item.get("id") {
                Some(Value::String(text)) => Some(MarkerId::Text(text.clone())),
                Some(Value::Number(number)) => Some(MarkerId::Number(number.clone())),
                _ => None,
            };

            Some(BackendRecord {
                id,
                name: item
                    .get("display_name")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                lat,
                lon,
            })
        })
        .collect()
}

fn coordinate(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Shape of the first few institutions, for checking what OpenAlex sends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugSummary {
    pub results_len: usize,
    pub first_geo: Option<Value>,
    pub first_keys: Option<Vec<String>>,
}

impl DebugSummary {
    pub fn from_results(results: &[Value]) -> Self {
        let first = results.first();
        Self {
            results_len: results.len(),
            first_geo: first.and_then(|item| item.get("geo")).cloned(),
            first_keys: first
                .and_then(Value::as_object)
                .map(|object| object.keys().cloned().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    fn institutions() -> Vec<Value> {
        vec![
            json!({
                "id": "https://openalex.org/I185261750",
                "display_name": "University of Toronto",
                "geo": {"city": "Toronto", "latitude": 43.66, "longitude": -79.39}
            }),
            json!({
                "id": "https://openalex.org/I5023651",
                "display_name": "McGill University",
                "geo": {"latitude": null, "longitude": null}
            }),
            json!({
                "id": "https://openalex.org/I1",
                "display_name": "Half Located",
                "geo": {"latitude": 45.0}
            }),
            json!({
                "id": "https://openalex.org/I2",
                "display_name": "No Geo"
            }),
            json!({
                "display_name": "Stringly Placed",
                "geo": {"latitude": "49.26", "longitude": "-123.25"}
            }),
        ]
    }

    #[test]
    fn keeps_only_located_institutions() {
        let records = clean_institutions(&institutions());

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].id,
            Some(MarkerId::from("https://openalex.org/I185261750"))
        );
        assert_eq!(records[0].name.as_deref(), Some("University of Toronto"));
        assert!((records[0].lat - 43.66).abs() < 1e-9);
        assert!((records[0].lon + 79.39).abs() < 1e-9);

        assert_eq!(records[1].id, None);
        assert_eq!(records[1].name.as_deref(), Some("Stringly Placed"));
        assert!((records[1].lat - 49.26).abs() < 1e-9);
    }

    #[test]
    fn debug_summary_describes_first_result() {
        let summary = DebugSummary::from_results(&institutions());
        assert_eq!(summary.results_len, 5);
        assert_eq!(
            summary.first_geo,
            Some(json!({"city": "Toronto", "latitude": 43.66, "longitude": -79.39}))
        );
        let keys = summary.first_keys.unwrap();
        assert!(keys.contains(&"display_name".to_string()));
        assert!(keys.contains(&"geo".to_string()));
    }

    #[test]
    fn debug_summary_of_nothing() {
        let summary = DebugSummary::from_results(&[]);
        let value = serde_json::to_value(summary).unwrap();
        assert_eq!(
            value,
            json!({"results_len": 0, "first_geo": null, "first_keys": null})
        );
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn client_sends_filter_and_page_size() {
        let app = Router::new().route(
            "/institutions",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                Json(json!({
                    "meta": {"count": 1},
                    "results": [{
                        "id": "https://openalex.org/I9",
                        "filter": query.get("filter"),
                        "per_page": query.get("per_page"),
                    }]
                }))
            }),
        );
        let base = serve(app).await;

        let client = OpenAlexClient::new(&format!("{base}/"), "CA").unwrap();
        let results = client.institutions(200).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["filter"], "country_code:CA");
        assert_eq!(results[0]["per_page"], "200");
    }

    #[tokio::test]
    async fn client_reports_upstream_status() {
        let app = Router::new().route(
            "/institutions",
            get(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "busy") }),
        );
        let base = serve(app).await;

        let client = OpenAlexClient::new(&base, "CA").unwrap();
        let error = client.institutions(5).await.unwrap_err();
        assert!(matches!(
            error,
            UpstreamError::Status(status) if status.as_u16() == 503
        ));
    }

    #[tokio::test]
    async fn missing_results_mean_empty_page() {
        let app = Router::new().route("/institutions", get(|| async { Json(json!({})) }));
        let base = serve(app).await;

        let client = OpenAlexClient::new(&base, "CA").unwrap();
        assert!(client.institutions(5).await.unwrap().is_empty());
    }
}
