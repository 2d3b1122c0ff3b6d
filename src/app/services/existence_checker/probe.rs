//! Existence probes
//!
//! A probe answers one question: is there a resource at this path? It may
//! return an error; the checker decides what an error means.

use super::path::ResourcePath;
use crate::constants::DEFAULT_PROBE_TIMEOUT_SECS;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CACHE_CONTROL;
use std::path::PathBuf;
use std::time::Duration;
use tracing::trace;
use url::Url;

/// Lightweight presence check for a resource
#[async_trait]
pub trait ResourceProbe: Send + Sync {
    /// Returns `Ok(true)` when the resource exists
    async fn probe(&self, path: &ResourcePath) -> Result<bool>;

    /// Short description used in log messages
    fn describe(&self) -> String;
}

/// Probes resources on a web server with `HEAD` requests
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    base_url: Url,
}

impl HttpProbe {
    /// Create a probe for the site at `base_url`
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("worksheet-catalog/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::http("Failed to build HTTP client", e))?;
        Ok(Self { client, base_url })
    }

    /// Create a probe with the default timeout
    pub fn with_default_timeout(base_url: Url) -> Result<Self> {
        Self::new(base_url, Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl ResourceProbe for HttpProbe {
    async fn probe(&self, path: &ResourcePath) -> Result<bool> {
        let url = path
            .resolve(&self.base_url)
            .map_err(|e| Error::invalid_url(path.url_path(), e))?;

        let response = self
            .client
            .head(url.clone())
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| Error::http(format!("HEAD {} failed", url), e))?;

        trace!("HEAD {} -> {}", url, response.status());
        Ok(response.status().is_success())
    }

    fn describe(&self) -> String {
        format!("HTTP HEAD against {}", self.base_url)
    }
}

/// Probes resources in a local copy of the public directory
#[derive(Debug, Clone)]
pub struct FsProbe {
    root: PathBuf,
}

impl FsProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ResourceProbe for FsProbe {
    async fn probe(&self, path: &ResourcePath) -> Result<bool> {
        let file = path.fs_path(&self.root).ok_or_else(|| {
            Error::catalog(format!("Refusing to probe {} outside {}", path, self.root.display()))
        })?;
        match tokio::fs::metadata(&file).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::io(format!("Failed to stat {}", file.display()), e)),
        }
    }

    fn describe(&self) -> String {
        format!("filesystem under {}", self.root.display())
    }
}
