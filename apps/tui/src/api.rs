use async_trait::async_trait;
use uni_map_core::{BackendRecord, FetchError, HealthStatus};

/// The two requests a MapView issues when it mounts.
#[async_trait]
pub trait UniversityBackend: Send + Sync {
    async fn health(&self) -> Result<HealthStatus, FetchError>;

    async fn universities(&self) -> Result<Vec<BackendRecord>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl UniversityBackend for HttpBackend {
    /// The status code is not inspected: any JSON body with a truthy `ok` counts.
    async fn health(&self) -> Result<HealthStatus, FetchError> {
        let url = self.url("/health");
        tracing::debug!(%url, "checking backend health");

        let response = self.client.get(&url).send().await.map_err(transport)?;
        let body = response.bytes().await.map_err(transport)?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    async fn universities(&self) -> Result<Vec<BackendRecord>, FetchError> {
        let url = self.url("/universities");
        tracing::debug!(%url, "fetching universities");

        let response = self.client.get(&url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

fn transport(error: reqwest::Error) -> FetchError {
    if error.is_decode() {
        FetchError::Decode(error.to_string())
    } else {
        FetchError::Network(error.to_string())
    }
}
