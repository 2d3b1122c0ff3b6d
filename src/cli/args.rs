//! Command-line argument definitions for the worksheet catalog
//!
//! This module defines the complete CLI interface using the clap derive API.
//! Options shared by every subcommand live in [`CommonArgs`] and are
//! flattened into each command's arguments.

use crate::app::models::Grade;
use crate::app::services::catalog_query::SearchScope;
use crate::config::ProbeMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the worksheet catalog tool
///
/// Browses, verifies and maintains the CSV catalog behind the SLAM worksheet
/// library.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "worksheet-catalog",
    version,
    about = "Browse, verify and maintain the SLAM worksheet catalog",
    long_about = "Reads the worksheet catalog CSV (locally or from the live site), filters worksheets \
                  by subject, grade, category and text, checks that every listed PDF exists, and \
                  performs offline CSV maintenance such as removing rows for missing files."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// List worksheets matching the given filters
    List(ListArgs),
    /// List videos referenced by the catalog
    Videos(VideosArgs),
    /// Report which catalog PDFs exist
    Check(CheckArgs),
    /// Show the record carried by a detail link
    Detail(DetailArgs),
    /// Remove catalog rows whose PDF is missing from the public directory
    Clean(CleanArgs),
    /// Remove whitespace before the .pdf extension in filenames
    FixFilenames(MaintenanceArgs),
    /// Rewrite the legacy Grade Level column as grade flag columns
    MigrateGrades(MaintenanceArgs),
}

/// Options accepted by every subcommand
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CommonArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ~/.config/worksheet-catalog/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Catalog CSV path or http(s) URL
    #[arg(
        short = 's',
        long = "source",
        value_name = "PATH|URL",
        help = "Catalog CSV path or http(s) URL"
    )]
    pub source: Option<String>,

    /// Root URL of the live site
    #[arg(
        long = "base-url",
        value_name = "URL",
        help = "Root URL of the live site (enables HTTP existence probes)"
    )]
    pub base_url: Option<String>,

    /// Local copy of the site's public directory
    #[arg(
        long = "public-dir",
        value_name = "PATH",
        help = "Local copy of the site's public directory"
    )]
    pub public_dir: Option<PathBuf>,

    #[arg(
        long = "probe",
        value_enum,
        value_name = "MODE",
        help = "How PDF existence is probed"
    )]
    pub probe_mode: Option<ProbeMode>,

    #[arg(
        short = 'j',
        long = "concurrency",
        value_name = "COUNT",
        help = "Number of existence probes in flight at once"
    )]
    pub concurrency: Option<usize>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides progress bars.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl CommonArgs {
    /// Log level from the flags, falling back to the configured level
    pub fn get_log_level<'a>(&self, configured: &'a str) -> &'a str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => configured,
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Output format and destination
#[derive(Debug, Clone, Default, clap::Args)]
pub struct OutputArgs {
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub format: OutputFormat,

    #[arg(
        short = 'o',
        long = "output-file",
        value_name = "FILE",
        help = "Write results to a file instead of stdout"
    )]
    pub output_file: Option<PathBuf>,
}

/// Arguments for the list command
#[derive(Debug, Clone, Parser)]
pub struct ListArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Subject to list (case-insensitive), e.g. math or reading
    #[arg(long = "subject", value_name = "NAME")]
    pub subject: Option<String>,

    /// Grade to list: K, 1 or 2
    #[arg(short = 'g', long = "grade", value_name = "GRADE")]
    pub grade: Option<Grade>,

    /// Exact category, e.g. Activity, Games, "Parent Guide"
    #[arg(long = "category", value_name = "NAME")]
    pub category: Option<String>,

    /// Case-insensitive text to search for
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    #[arg(
        long = "search-in",
        value_enum,
        default_value = "both",
        help = "Fields searched by --search"
    )]
    pub search_in: SearchField,

    #[arg(long = "with-video", help = "Only worksheets with a video")]
    pub with_video: bool,

    #[arg(
        long = "guides",
        help = "List parent guides (subject \"Parent Resources Guide\") instead of worksheets"
    )]
    pub guides: bool,

    #[arg(long = "verify", help = "Only list worksheets whose PDF exists")]
    pub verify: bool,
}

/// Arguments for the videos command
#[derive(Debug, Clone, Parser)]
pub struct VideosArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Standalone video list (Title,Link) to join with catalog worksheets
    #[arg(long = "videos", value_name = "PATH|URL")]
    pub videos: Option<String>,
}

/// Arguments for the check command
#[derive(Debug, Clone, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[arg(long = "missing-only", help = "Only report records whose PDF is missing")]
    pub missing_only: bool,
}

/// Arguments for the detail command
#[derive(Debug, Clone, Parser)]
pub struct DetailArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Detail link, e.g. "/worksheet/3?Filename=Counting+Fun&Subject=Math"
    #[arg(value_name = "URL")]
    pub url: String,
}

/// Arguments for the clean command
#[derive(Debug, Clone, Parser)]
pub struct CleanArgs {
    #[command(flatten)]
    pub maintenance: MaintenanceArgs,

    /// Directory holding the per-subject PDF folders
    ///
    /// Defaults to {public-dir}/{worksheets prefix}.
    #[arg(long = "worksheets-dir", value_name = "PATH")]
    pub worksheets_dir: Option<PathBuf>,
}

/// Arguments shared by the maintenance commands
#[derive(Debug, Clone, Parser)]
pub struct MaintenanceArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Report what would change without writing anything
    #[arg(long = "dry-run", help = "Show what would change without writing files")]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Csv,
}

/// Fields searched by `--search`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SearchField {
    Filename,
    Category,
    #[default]
    Both,
}

impl From<SearchField> for SearchScope {
    fn from(field: SearchField) -> Self {
        match field {
            SearchField::Filename => SearchScope::Filename,
            SearchField::Category => SearchScope::Category,
            SearchField::Both => SearchScope::Both,
        }
    }
}

impl Commands {
    /// Options shared by every command
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::List(args) => &args.common,
            Commands::Videos(args) => &args.common,
            Commands::Check(args) => &args.common,
            Commands::Detail(args) => &args.common,
            Commands::Clean(args) => &args.maintenance.common,
            Commands::FixFilenames(args) | Commands::MigrateGrades(args) => &args.common,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Commands::List(_) => "list",
            Commands::Videos(_) => "videos",
            Commands::Check(_) => "check",
            Commands::Detail(_) => "detail",
            Commands::Clean(_) => "clean",
            Commands::FixFilenames(_) => "fix-filenames",
            Commands::MigrateGrades(_) => "migrate-grades",
        }
    }
}
