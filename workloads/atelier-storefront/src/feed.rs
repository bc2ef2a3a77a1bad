//! Product feed sources.
//!
//! The feed is one JSON document fetched once at startup. Sources only
//! fetch text; parsing and validation happen when the storefront installs
//! the catalog.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use atelier_commerce::CommerceError;
use atelier_observability::StructuredLogger;

use crate::config::FeedConfig;

/// Why the product feed could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum FeedLoadError {
    #[error("Feed unreachable: {0}")]
    Unreachable(String),

    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Malformed feed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid feed: {0}")]
    Invalid(#[from] CommerceError),
}

/// Something that can produce the product feed document.
#[async_trait(?Send)]
pub trait FeedSource {
    /// Fetch the raw feed document.
    async fn fetch(&self) -> Result<String, FeedLoadError>;

    /// Where the feed comes from, for logs.
    fn describe(&self) -> String;
}

/// Log the request and fetch the feed document from `source`.
pub async fn fetch_feed(
    logger: &StructuredLogger,
    source: &dyn FeedSource,
) -> Result<String, FeedLoadError> {
    logger
        .info_builder("loading product feed")
        .field("source", source.describe())
        .emit();
    source.fetch().await
}

/// A feed held in memory.
#[derive(Debug, Clone)]
pub struct StaticFeed {
    document: String,
}

impl StaticFeed {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }
}

#[async_trait(?Send)]
impl FeedSource for StaticFeed {
    async fn fetch(&self) -> Result<String, FeedLoadError> {
        Ok(self.document.clone())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

/// A feed read from the local filesystem.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl FeedSource for FileFeed {
    async fn fetch(&self) -> Result<String, FeedLoadError> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A feed fetched over HTTP.
///
/// In the browser a relative URL resolves against the page location. The
/// timeout is only enforced on native builds.
#[derive(Debug, Clone)]
pub struct HttpFeed {
    url: String,
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl HttpFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
            client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Give up after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        let feed = Self::new(config.url.clone());
        match config.timeout() {
            Some(timeout) => feed.with_timeout(timeout),
            None => feed,
        }
    }

    fn resolve_url(&self) -> Result<reqwest::Url, FeedLoadError> {
        if let Ok(url) = reqwest::Url::parse(&self.url) {
            return Ok(url);
        }
        let base = page_location().ok_or_else(|| {
            FeedLoadError::Unreachable(format!("relative feed URL {} has no base", self.url))
        })?;
        base.join(&self.url)
            .map_err(|e| FeedLoadError::Unreachable(format!("{}: {}", self.url, e)))
    }
}

#[async_trait(?Send)]
impl FeedSource for HttpFeed {
    async fn fetch(&self) -> Result<String, FeedLoadError> {
        let url = self.resolve_url()?;

        let request = self.client.get(url.clone());
        #[cfg(not(target_arch = "wasm32"))]
        let request = match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| classify(e, url.as_str()))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(FeedLoadError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().await.map_err(|e| classify(e, url.as_str()))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

fn classify(err: reqwest::Error, url: &str) -> FeedLoadError {
    if err.is_timeout() {
        FeedLoadError::Timeout(url.to_string())
    } else if let Some(status) = err.status() {
        FeedLoadError::Http {
            status: status.as_u16(),
            url: url.to_string(),
        }
    } else {
        FeedLoadError::Unreachable(err.to_string())
    }
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
fn page_location() -> Option<reqwest::Url> {
    let href = web_sys::window()?.location().href().ok()?;
    reqwest::Url::parse(&href).ok()
}

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
fn page_location() -> Option<reqwest::Url> {
    None
}
