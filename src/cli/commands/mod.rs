//! Command implementations for the worksheet catalog CLI
//!
//! Each subcommand loads its configuration through [`shared::prepare`],
//! does its work and returns a [`CommandSummary`] for the binary to log.

pub mod check;
pub mod detail;
pub mod list;
pub mod maintain;
pub mod shared;
pub mod videos;

pub use shared::CommandSummary;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Run the selected subcommand
pub async fn run(args: Args) -> Result<CommandSummary> {
    let command = args
        .command
        .ok_or_else(|| Error::configuration("No command given; see --help"))?;

    match command {
        Commands::List(args) => list::run_list(args).await,
        Commands::Videos(args) => videos::run_videos(args).await,
        Commands::Check(args) => check::run_check(args).await,
        Commands::Detail(args) => detail::run_detail(args).await,
        Commands::Clean(args) => maintain::run_clean(args).await,
        Commands::FixFilenames(args) => maintain::run_fix_filenames(args).await,
        Commands::MigrateGrades(args) => maintain::run_migrate_grades(args).await,
    }
}
