//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables, then command-line flags (applied by the CLI). The
//! merged result is validated once before any command runs.
//!
//! ```toml
//! [catalog]
//! source = "https://slam.example.org/worksheets/worksheet_metadata.csv"
//!
//! [site]
//! base_url = "https://slam.example.org"
//! public_dir = "public"
//! worksheets_prefix = "worksheets"
//!
//! [probe]
//! mode = "http"
//! concurrency = 16
//! timeout_secs = 10
//! ```

use crate::app::services::catalog_loader::CatalogSource;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CATALOG_PATH, DEFAULT_LOG_LEVEL,
    DEFAULT_PROBE_TIMEOUT_SECS, DEFAULT_PUBLIC_DIR, DEFAULT_WORKSHEETS_PREFIX,
    default_probe_concurrency, env_vars,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Complete tool configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub site: SiteConfig,
    pub probe: ProbeConfig,
    pub logging: LoggingConfig,
}

/// Where catalog documents are read from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog CSV path or `http(s)://` URL
    pub source: String,

    /// Optional standalone video list (`Title,Link`)
    pub videos_source: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_CATALOG_PATH.to_string(),
            videos_source: None,
        }
    }
}

/// Layout of the published website
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root URL of the live site, required for HTTP probing
    pub base_url: Option<String>,

    /// Local copy of the site's public directory
    pub public_dir: PathBuf,

    /// First path segment of worksheet PDFs
    pub worksheets_prefix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            worksheets_prefix: DEFAULT_WORKSHEETS_PREFIX.to_string(),
        }
    }
}

/// How PDF existence is probed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProbeMode {
    /// HTTP when a base URL is configured, otherwise the local public directory
    #[default]
    Auto,
    /// `HEAD` requests against the live site
    Http,
    /// Files under the local public directory
    Filesystem,
}

/// Existence probe settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub mode: ProbeMode,

    /// Probes in flight at once
    pub concurrency: usize,

    /// Per-request timeout for HTTP probes and catalog downloads
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            mode: ProbeMode::Auto,
            concurrency: default_probe_concurrency(),
            timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when neither `-v` nor `-q` is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Default config file location (`{config_dir}/worksheet-catalog/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        Self::from_toml(&content, &path.display().to_string())
    }

    /// Parse configuration from TOML text; `origin` names the source in errors
    pub fn from_toml(content: &str, origin: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config_parse(origin, e))
    }

    /// Defaults, then the optional file, then environment variables
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                debug!("Reading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.apply_env_with(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(source) = lookup(env_vars::CATALOG_SOURCE) {
            debug!("{} overrides catalog source", env_vars::CATALOG_SOURCE);
            self.catalog.source = source;
        }
        if let Some(base_url) = lookup(env_vars::BASE_URL) {
            debug!("{} overrides site base URL", env_vars::BASE_URL);
            self.site.base_url = Some(base_url);
        }
        if let Some(public_dir) = lookup(env_vars::PUBLIC_DIR) {
            debug!("{} overrides public directory", env_vars::PUBLIC_DIR);
            self.site.public_dir = PathBuf::from(public_dir);
        }
    }

    /// Check the merged configuration for unusable values
    pub fn validate(&self) -> Result<()> {
        if self.catalog.source.trim().is_empty() {
            return Err(Error::configuration("Catalog source cannot be empty"));
        }
        if self.probe.concurrency == 0 {
            return Err(Error::configuration("Probe concurrency must be at least 1"));
        }
        if self.probe.timeout_secs == 0 {
            return Err(Error::configuration("Probe timeout must be at least 1 second"));
        }
        if self.site.worksheets_prefix.trim_matches('/').trim().is_empty() {
            return Err(Error::configuration("Worksheets prefix cannot be empty"));
        }

        let base_url = self.base_url()?;
        if self.probe.mode == ProbeMode::Http && base_url.is_none() {
            return Err(Error::configuration(
                "HTTP probing requires a site base URL (--base-url or WORKSHEET_CATALOG_BASE_URL)",
            ));
        }
        Ok(())
    }

    /// Parsed site base URL, if configured
    pub fn base_url(&self) -> Result<Option<Url>> {
        match self.site.base_url.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => {
                let url = Url::parse(raw).map_err(|e| Error::invalid_url(raw, e))?;
                if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
                    return Err(Error::configuration(format!(
                        "Site base URL must be an http(s) URL, got '{}'",
                        raw
                    )));
                }
                Ok(Some(url))
            }
        }
    }

    /// Probe mode after resolving `auto`
    pub fn effective_probe_mode(&self) -> ProbeMode {
        match self.probe.mode {
            ProbeMode::Auto
                if self
                    .site
                    .base_url
                    .as_deref()
                    .is_some_and(|url| !url.trim().is_empty()) =>
            {
                ProbeMode::Http
            }
            ProbeMode::Auto => ProbeMode::Filesystem,
            mode => mode,
        }
    }

    pub fn catalog_source(&self) -> Result<CatalogSource> {
        CatalogSource::parse(&self.catalog.source)
    }

    pub fn videos_source(&self) -> Result<Option<CatalogSource>> {
        self.catalog
            .videos_source
            .as_deref()
            .map(CatalogSource::parse)
            .transpose()
    }

    /// Local directory holding the per-subject PDF folders
    pub fn worksheets_dir(&self) -> PathBuf {
        self.site
            .public_dir
            .join(self.site.worksheets_prefix.trim_matches('/'))
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();

        assert_eq!(config.catalog.source, DEFAULT_CATALOG_PATH);
        assert_eq!(config.site.worksheets_prefix, "worksheets");
        assert!(config.probe.concurrency >= 1);
        assert_eq!(config.effective_probe_mode(), ProbeMode::Filesystem);
        assert_eq!(config.worksheets_dir(), Path::new("public/worksheets"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            "[site]\nbase_url = \"https://slam.example.org\"\n\n[probe]\nconcurrency = 3\n",
            "inline",
        )
        .unwrap();

        assert_eq!(config.site.base_url.as_deref(), Some("https://slam.example.org"));
        assert_eq!(config.probe.concurrency, 3);
        assert_eq!(config.probe.timeout_secs, DEFAULT_PROBE_TIMEOUT_SECS);
        assert_eq!(config.catalog.source, DEFAULT_CATALOG_PATH);
        assert_eq!(config.effective_probe_mode(), ProbeMode::Http);
    }

    #[test]
    fn test_invalid_toml_reports_origin() {
        let result = Config::from_toml("[probe]\nconcurrency = \"many\"\n", "broken.toml");

        match result {
            Err(Error::ConfigParse { path, .. }) => assert_eq!(path, "broken.toml"),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_layered_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[probe]\nmode = \"filesystem\"\ntimeout_secs = 5\n").unwrap();

        let config = Config::load_layered(Some(&path)).unwrap();

        assert_eq!(config.probe.mode, ProbeMode::Filesystem);
        assert_eq!(config.probe_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_load_layered_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = Config::load_layered(Some(&dir.path().join("absent.toml")));

        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_environment_overrides_file_values() {
        let mut config = Config::default();
        config.apply_env_with(env(&[
            (env_vars::CATALOG_SOURCE, "https://slam.example.org/meta.csv"),
            (env_vars::BASE_URL, "https://slam.example.org"),
            (env_vars::PUBLIC_DIR, "/srv/slam/public"),
        ]));

        assert!(config.catalog_source().unwrap().is_remote());
        assert_eq!(config.site.base_url.as_deref(), Some("https://slam.example.org"));
        assert_eq!(
            config.worksheets_dir(),
            Path::new("/srv/slam/public/worksheets")
        );
    }

    #[test]
    fn test_blank_environment_values_are_ignored() {
        let mut config = Config::default();
        config.apply_env_with(env(&[(env_vars::CATALOG_SOURCE, "  ")]));

        assert_eq!(config.catalog.source, DEFAULT_CATALOG_PATH);
    }

    #[test]
    fn test_validate_rejects_unusable_settings() {
        let mut config = Config::default();
        config.probe.concurrency = 0;
        assert!(matches!(config.validate(), Err(Error::Configuration { .. })));

        let mut config = Config::default();
        config.probe.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.site.worksheets_prefix = "/".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.probe.mode = ProbeMode::Http;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.site.base_url = Some("not a url".to_string());
        assert!(matches!(config.validate(), Err(Error::InvalidUrl { .. })));

        let mut config = Config::default();
        config.site.base_url = Some("ftp://slam.example.org".to_string());
        assert!(matches!(config.validate(), Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_videos_source_is_optional() {
        let mut config = Config::default();
        assert!(config.videos_source().unwrap().is_none());

        config.catalog.videos_source = Some("public/videos.csv".to_string());
        assert_eq!(
            config.videos_source().unwrap(),
            Some(CatalogSource::File(PathBuf::from("public/videos.csv")))
        );
    }
}
