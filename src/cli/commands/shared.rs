//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading, progress bars, output
//! writing and construction of the services every command needs.

use crate::app::services::catalog_loader::{CatalogLoader, CatalogSource};
use crate::app::services::existence_checker::{
    ExistenceChecker, FsProbe, HttpProbe, ResourceProbe,
};
use crate::cli::args::{CommonArgs, OutputArgs};
use crate::config::{Config, ProbeMode};
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Outcome of a command, reported by the binary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSummary {
    /// Subcommand name
    pub command: &'static str,
    /// Records, videos or rows the command reported on
    pub items: usize,
    /// Wall-clock time spent
    pub duration: Duration,
}

impl CommandSummary {
    pub fn new(command: &'static str, items: usize, duration: Duration) -> Self {
        Self {
            command,
            items,
            duration,
        }
    }
}

/// Load configuration and start logging; the first step of every command
pub fn prepare(common: &CommonArgs) -> Result<Config> {
    let config = load_configuration(common)?;
    setup_logging(common, &config.logging.level)?;
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence; otherwise the level comes from `-v`/`-q` or
/// the configured default. Repeated calls keep the first subscriber.
pub fn setup_logging(common: &CommonArgs, configured_level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = common.get_log_level(configured_level);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("worksheet_catalog={}", log_level)));

    let result = if common.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    match result {
        Ok(()) => debug!("Logging initialized at level: {}", log_level),
        Err(_) => debug!("Logging already initialized"),
    }
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(common: &CommonArgs) -> Result<Config> {
    let default_config_path = if common.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &common.config_file {
        Some(path) => {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            Some(path.as_path())
        }
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    let mut config = Config::load_layered(config_file)?;
    apply_cli_overrides(&mut config, common);
    config.validate()?;
    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, common: &CommonArgs) {
    if let Some(source) = &common.source {
        config.catalog.source = source.clone();
    }
    if let Some(base_url) = &common.base_url {
        config.site.base_url = Some(base_url.clone());
    }
    if let Some(public_dir) = &common.public_dir {
        config.site.public_dir = public_dir.clone();
    }
    if let Some(mode) = common.probe_mode {
        config.probe.mode = mode;
    }
    if let Some(concurrency) = common.concurrency {
        config.probe.concurrency = concurrency;
    }
}

/// Catalog loader honouring the configured timeout
pub fn catalog_loader(config: &Config) -> Result<CatalogLoader> {
    CatalogLoader::new(config.probe_timeout())
}

/// Existence checker for the configured probe mode
pub fn build_checker(config: &Config) -> Result<ExistenceChecker> {
    let probe: Arc<dyn ResourceProbe> = match config.effective_probe_mode() {
        ProbeMode::Http => {
            let base_url = config.base_url()?.ok_or_else(|| {
                Error::configuration("HTTP probing requires a site base URL")
            })?;
            Arc::new(HttpProbe::new(base_url, config.probe_timeout())?)
        }
        ProbeMode::Filesystem | ProbeMode::Auto => {
            Arc::new(FsProbe::new(config.site.public_dir.clone()))
        }
    };
    info!("Probing PDFs via {}", probe.describe());

    Ok(ExistenceChecker::new(probe)
        .with_prefix(config.site.worksheets_prefix.clone())
        .with_concurrency(config.probe.concurrency))
}

/// Local catalog file, required by the maintenance commands
pub fn local_catalog_path(config: &Config) -> Result<PathBuf> {
    match config.catalog_source()? {
        CatalogSource::File(path) => Ok(path),
        CatalogSource::Remote(url) => Err(Error::configuration(format!(
            "Maintenance needs a local catalog file, but the source is {}",
            url
        ))),
    }
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> Result<ProgressBar> {
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .map_err(|e| Error::configuration(format!("Invalid progress bar template: {}", e)))?
        .progress_chars("#>-");

    let pb = ProgressBar::new(total);
    pb.set_style(style);
    pb.set_message(message.to_string());
    Ok(pb)
}

/// Progress bar for a batch, or `None` when progress is hidden
pub fn optional_progress_bar(
    common: &CommonArgs,
    total: usize,
    message: &str,
) -> Result<Option<ProgressBar>> {
    if common.show_progress() && total > 0 {
        create_progress_bar(total as u64, message).map(Some)
    } else {
        Ok(None)
    }
}

/// Pretty-printed JSON for command output
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| Error::serialization("Failed to serialize command output", e))
}

/// Write results to the requested file or stdout
pub fn emit(output: &OutputArgs, content: &str) -> Result<()> {
    match &output.output_file {
        Some(path) => {
            std::fs::write(path, content).map_err(|e| {
                Error::io(format!("Failed to write results to {}", path.display()), e)
            })?;
            info!("Results written to: {}", path.display());
        }
        None => println!("{}", content.trim_end_matches('\n')),
    }
    Ok(())
}

/// Disable ANSI colors when results are not going to a terminal as human text
pub fn configure_colors(output: &OutputArgs) {
    if output.output_file.is_some() {
        colored::control::set_override(false);
    }
}

/// Join values as one CSV output line
pub fn csv_row<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|value| csv_escape(value.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Escape CSV field values
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
