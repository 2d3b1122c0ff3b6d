//! Catalog loading from a local file or the published website
//!
//! Remote catalogs are fetched with a `v={unix millis}` query parameter so
//! browser and proxy caches never serve a stale copy. A non-success status is
//! an error rather than an empty catalog.

pub mod source;


pub use source::CatalogSource;

use crate::app::models::{Catalog, Video};
use crate::constants::{CACHE_BUST_PARAM, DEFAULT_PROBE_TIMEOUT_SECS};
use crate::{Error, Result};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Reads catalog and video CSV documents
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    client: Client,
}

impl CatalogLoader {
    /// Create a loader whose HTTP requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("worksheet-catalog/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::http("Failed to build HTTP client", e))?;
        Ok(Self { client })
    }

    pub fn with_default_timeout() -> Result<Self> {
        Self::new(Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS))
    }

    /// Raw CSV text of a source
    pub async fn load_text(&self, source: &CatalogSource) -> Result<String> {
        let text = match source {
            CatalogSource::File(path) => read_file(path).await?,
            CatalogSource::Remote(url) => self.fetch(url).await?,
        };
        Ok(text.trim_start_matches(BYTE_ORDER_MARK).to_string())
    }

    /// Load and parse the worksheet catalog
    pub async fn load_catalog(&self, source: &CatalogSource) -> Result<Catalog> {
        info!("Loading catalog from {}", source);
        let text = self.load_text(source).await?;
        Ok(Catalog::from_csv_text(&text))
    }

    /// Load a standalone video list
    pub async fn load_videos(&self, source: &CatalogSource) -> Result<Vec<Video>> {
        info!("Loading videos from {}", source);
        let text = self.load_text(source).await?;
        Ok(crate::app::services::record_builder::videos_from_csv_text(&text))
    }

    async fn fetch(&self, url: &Url) -> Result<String> {
        let url = cache_busted(url, chrono::Utc::now().timestamp_millis());
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::http(format!("GET {} failed", url), e))?
            .error_for_status()
            .map_err(|e| Error::http(format!("GET {} returned an error status", url), e))?;

        response
            .text()
            .await
            .map_err(|e| Error::http(format!("Failed to read body of {}", url), e))
    }
}

/// Copy of `url` with the cache-busting parameter set to `millis`
pub fn cache_busted(url: &Url, millis: i64) -> Url {
    let mut busted = url.clone();
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| *key != CACHE_BUST_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    busted
        .query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(CACHE_BUST_PARAM, &millis.to_string());
    busted
}

async fn read_file(path: &Path) -> Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Error::file_not_found(path.display().to_string()))
        }
        Err(e) => Err(Error::io(format!("Failed to read {}", path.display()), e)),
    }
}
