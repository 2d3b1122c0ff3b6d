//! Maintenance command implementations
//!
//! `clean`, `fix-filenames` and `migrate-grades` rewrite the local catalog
//! CSV. Each prints its report and, unless `--dry-run` is given, leaves a
//! timestamped backup next to the CSV before replacing it.

use super::shared::{
    CommandSummary, configure_colors, csv_row, emit, local_catalog_path, prepare, to_json,
};
use crate::app::services::maintenance::{
    CleanReport, FixReport, MigrateReport, WriteOutcome, clean_missing, fix_filenames,
    migrate_grades,
};
use crate::cli::args::{CleanArgs, MaintenanceArgs, OutputFormat};
use crate::Result;
use colored::*;
use std::time::Instant;
use tracing::{debug, info};

/// Clean command runner
pub async fn run_clean(args: CleanArgs) -> Result<CommandSummary> {
    let start_time = Instant::now();
    let common = &args.maintenance.common;
    let config = prepare(common)?;
    debug!("Clean arguments: {:?}", args);

    let csv_path = local_catalog_path(&config)?;
    let worksheets_dir = args
        .worksheets_dir
        .clone()
        .unwrap_or_else(|| config.worksheets_dir());
    let report = clean_missing(&csv_path, &worksheets_dir, args.maintenance.dry_run)?;
    info!("{}", report.summary());

    let output = &args.maintenance.output;
    configure_colors(output);
    let rendered = match output.format {
        OutputFormat::Human => render_clean_human(&report),
        OutputFormat::Json => to_json(&report)?,
        OutputFormat::Csv => {
            let mut csv = csv_row(&["filename", "action"]);
            csv.push('\n');
            for filename in &report.removed {
                csv.push_str(&csv_row(&[filename.as_str(), "removed"]));
                csv.push('\n');
            }
            csv
        }
    };
    emit(output, &rendered)?;

    Ok(CommandSummary::new(
        "clean",
        report.removed.len(),
        start_time.elapsed(),
    ))
}

/// Fix-filenames command runner
pub async fn run_fix_filenames(args: MaintenanceArgs) -> Result<CommandSummary> {
    let start_time = Instant::now();
    let config = prepare(&args.common)?;
    debug!("Fix-filenames arguments: {:?}", args);

    let csv_path = local_catalog_path(&config)?;
    let report = fix_filenames(&csv_path, args.dry_run)?;
    info!("{}", report.summary());

    configure_colors(&args.output);
    let rendered = match args.output.format {
        OutputFormat::Human => render_fix_human(&report),
        OutputFormat::Json => to_json(&report)?,
        OutputFormat::Csv => {
            let mut csv = csv_row(&["line", "original", "fixed"]);
            csv.push('\n');
            for fix in &report.fixed {
                csv.push_str(&csv_row(&[
                    fix.line.to_string(),
                    fix.original.clone(),
                    fix.fixed.clone(),
                ]));
                csv.push('\n');
            }
            csv
        }
    };
    emit(&args.output, &rendered)?;

    Ok(CommandSummary::new(
        "fix-filenames",
        report.fixed.len(),
        start_time.elapsed(),
    ))
}

/// Migrate-grades command runner
pub async fn run_migrate_grades(args: MaintenanceArgs) -> Result<CommandSummary> {
    let start_time = Instant::now();
    let config = prepare(&args.common)?;
    debug!("Migrate-grades arguments: {:?}", args);

    let csv_path = local_catalog_path(&config)?;
    let report = migrate_grades(&csv_path, args.dry_run)?;
    info!("{}", report.summary());

    configure_colors(&args.output);
    let rendered = match args.output.format {
        OutputFormat::Human => render_migrate_human(&report),
        OutputFormat::Json => to_json(&report)?,
        OutputFormat::Csv => {
            let mut csv = csv_row(&["schema_before", "rows", "ungraded", "written"]);
            csv.push('\n');
            csv.push_str(&csv_row(&[
                format!("{:?}", report.schema_before),
                report.rows.to_string(),
                report.ungraded.to_string(),
                report.outcome.written().to_string(),
            ]));
            csv.push('\n');
            csv
        }
    };
    emit(&args.output, &rendered)?;

    Ok(CommandSummary::new(
        "migrate-grades",
        report.rows,
        start_time.elapsed(),
    ))
}

fn render_clean_human(report: &CleanReport) -> String {
    let mut output = String::new();
    for (subject, count) in &report.listed {
        output.push_str(&format!("{} {} PDFs in {}\n", "•".blue(), count, subject));
    }
    for filename in &report.removed {
        output.push_str(&format!("{} {}\n", "-".red(), filename));
    }
    for line in &report.malformed {
        output.push_str(&format!("{} line {} has no filename or subject\n", "!".yellow(), line));
    }
    output.push_str(&format!("\n{}\n", report.summary()));
    output.push_str(&outcome_line(&report.outcome));
    output
}

fn render_fix_human(report: &FixReport) -> String {
    let mut output = String::new();
    for fix in &report.fixed {
        output.push_str(&format!(
            "line {}: {} -> {}\n",
            fix.line,
            fix.original.red(),
            fix.fixed.green()
        ));
    }
    output.push_str(&format!("\n{}\n", report.summary()));
    output.push_str(&outcome_line(&report.outcome));
    output
}

fn render_migrate_human(report: &MigrateReport) -> String {
    format!("{}\n{}", report.summary(), outcome_line(&report.outcome))
}

fn outcome_line(outcome: &WriteOutcome) -> String {
    let line = match (&outcome.backup_path, outcome.changed, outcome.dry_run) {
        (Some(backup), _, _) => format!(
            "{} catalog updated, backup at {}",
            "✓".green(),
            backup.display()
        ),
        (None, false, _) => "No changes needed".to_string(),
        (None, true, true) => format!("{} dry run, nothing written", "!".yellow()),
        (None, true, false) => "Catalog left unchanged".to_string(),
    };
    format!("{}\n", line)
}
