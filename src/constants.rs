//! Application constants for the worksheet catalog
//!
//! This module contains column names, sentinel values, path conventions and
//! default settings used throughout the worksheet catalog tooling.

// =============================================================================
// Catalog Locations and Path Conventions
// =============================================================================

/// Default location of the catalog CSV, relative to the site root
pub const DEFAULT_CATALOG_PATH: &str = "public/worksheets/worksheet_metadata.csv";

/// Default public directory served by the website
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// First path segment of every worksheet PDF (`/worksheets/{subject}/{file}.pdf`)
pub const DEFAULT_WORKSHEETS_PREFIX: &str = "worksheets";

/// Extension appended to filenames that lack it
pub const PDF_EXTENSION: &str = ".pdf";

/// Route of the worksheet detail view
pub const DETAIL_ROUTE: &str = "/worksheet";

/// Query parameter used to bust browser and proxy caches when fetching the catalog
pub const CACHE_BUST_PARAM: &str = "v";

/// Infix placed between the catalog stem and the timestamp of a backup copy
pub const BACKUP_INFIX: &str = "_backup_";

// =============================================================================
// Column Names
// =============================================================================

/// Column names of the catalog CSV
pub mod columns {
    pub const FILENAME: &str = "Filename";
    pub const SUBJECT: &str = "Subject";
    pub const CATEGORY: &str = "Category";
    pub const DESCRIPTION: &str = "Description";
    pub const VIDEO_TITLE: &str = "Video Title";
    pub const VIDEO_LINK: &str = "Video Link";

    /// Legacy free-text grade column ("K, 1, 2")
    pub const GRADE_LEVEL: &str = "Grade Level";

    /// Boolean grade flag columns
    pub const IS_KINDER: &str = "isKinder";
    pub const IS_FIRST: &str = "isFirst";
    pub const IS_SECOND: &str = "isSecond";

    /// All grade flag columns in schema order
    pub const GRADE_FLAGS: &[&str] = &[IS_KINDER, IS_FIRST, IS_SECOND];

    /// Columns of a standalone video list
    pub const TITLE: &str = "Title";
    pub const LINK: &str = "Link";
}

// =============================================================================
// Sentinel Values
// =============================================================================

/// Placeholder used instead of an empty video title or link
pub const NOT_APPLICABLE: &str = "n/a";

/// Subject value reserved for generic parent guides
pub const PARENT_GUIDE_SUBJECT: &str = "Parent Resources Guide";

/// Literal value of a set grade flag
pub const FLAG_TRUE: &str = "TRUE";

/// Literal value of an unset grade flag
pub const FLAG_FALSE: &str = "FALSE";

/// Display title of a record with an empty filename
pub const UNTITLED: &str = "Untitled";

/// Category values recognised by the catalog
pub mod categories {
    pub const ACTIVITY: &str = "Activity";
    pub const PARENT_GUIDE: &str = "Parent Guide";
    pub const GAMES: &str = "Games";

    /// Misspelling of "Games" present in older catalog rows
    pub const GAMES_MISSPELLED: &str = "Ganes";

    /// Badge label shown for game resources
    pub const GAME_BADGE: &str = "Game";

    /// Badge label shown when a record has no category
    pub const FALLBACK_BADGE: &str = "Resource";
}

// =============================================================================
// Video Embedding
// =============================================================================

/// Length of a YouTube video identifier
pub const YOUTUBE_ID_LENGTH: usize = 11;

/// Base URL of the embeddable YouTube player
pub const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

// =============================================================================
// Configuration Defaults
// =============================================================================

/// Application directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "worksheet-catalog";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default timeout for a single existence probe, in seconds
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 30;

/// Concurrent probes per CPU when no explicit limit is configured
pub const PROBES_PER_CPU: usize = 4;

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Environment variables consulted when loading configuration
pub mod env_vars {
    pub const CATALOG_SOURCE: &str = "WORKSHEET_CATALOG_SOURCE";
    pub const BASE_URL: &str = "WORKSHEET_CATALOG_BASE_URL";
    pub const PUBLIC_DIR: &str = "WORKSHEET_CATALOG_PUBLIC_DIR";
}

/// Default number of concurrent existence probes
pub fn default_probe_concurrency() -> usize {
    num_cpus::get().max(1) * PROBES_PER_CPU
}
