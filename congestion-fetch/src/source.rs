use async_trait::async_trait;
use congestion_core::Error;
use congestion_core::config::DatasetConfig;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Something that yields the raw dataset document.
///
/// Implementations only move bytes and decode JSON; locating the records
/// inside the document is left to `congestion_core::dataset`.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn fetch(&self) -> Result<Value, Error>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// Decode a response body. `null` counts as undecodable.
pub fn decode_document(body: &[u8]) -> Result<Value, Error> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Null) | Err(_) => Err(Error::InvalidResponse),
        Ok(doc) => Ok(doc),
    }
}

// ── HTTP ──────────────────────────────────────────────────────

/// Fetches the dataset from the configured endpoint.
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(config: &DatasetConfig) -> Result<Self, Error> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("Cliente HTTP no válido: {e}")))?;

        Ok(Self {
            client,
            url: config.url.trim().to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    async fn fetch(&self) -> Result<Value, Error> {
        let resp = self.client.get(&self.url).send().await.map_err(|e| {
            warn!(url = %self.url, error = %e, "Dataset request failed");
            Error::Fetch(format!("Error de red: {e}"))
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!(
                "HTTP {} al llamar a {}",
                status.as_u16(),
                self.url
            )));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::Fetch(format!("Error de red: {e}")))?;
        debug!(url = %self.url, bytes = body.len(), "Dataset downloaded");

        decode_document(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

// ── File ──────────────────────────────────────────────────────

/// Reads a previously saved dataset document from disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    async fn fetch(&self) -> Result<Value, Error> {
        let body = tokio::fs::read(&self.path).await.map_err(|e| {
            Error::Fetch(format!("No se pudo leer {}: {e}", self.path.display()))
        })?;
        decode_document(&body)
    }

    fn describe(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

// ── Static ────────────────────────────────────────────────────

/// Serves a fixed document.
#[derive(Debug, Clone)]
pub struct StaticSource(pub Value);

#[async_trait]
impl DatasetSource for StaticSource {
    async fn fetch(&self) -> Result<Value, Error> {
        if self.0.is_null() {
            return Err(Error::InvalidResponse);
        }
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "static".into()
    }
}
