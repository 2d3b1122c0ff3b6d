//! Check command implementation
//!
//! Probes every catalog PDF and reports which ones are missing.

use super::shared::{
    CommandSummary, build_checker, catalog_loader, configure_colors, csv_row, emit, prepare,
    optional_progress_bar, to_json,
};
use crate::app::models::WorksheetRecord;
use crate::app::services::existence_checker::{ExistenceChecker, ExistenceReport};
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::Result;
use colored::*;
use serde::Serialize;
use std::time::Instant;
use tracing::debug;

/// One probed record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckEntry {
    pub filename: String,
    pub subject: String,
    pub path: Option<String>,
    pub exists: bool,
}

/// Existence report in output form
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckSummary {
    pub total: usize,
    pub present: usize,
    pub missing: usize,
    pub entries: Vec<CheckEntry>,
}

impl CheckSummary {
    pub fn from_report(
        report: &ExistenceReport<'_>,
        checker: &ExistenceChecker,
        missing_only: bool,
    ) -> Self {
        let entry = |record: &WorksheetRecord, exists: bool| CheckEntry {
            filename: record.filename.clone(),
            subject: record.subject.clone(),
            path: checker.resource_path(record).map(|p| p.url_path()),
            exists,
        };

        let mut entries: Vec<CheckEntry> = Vec::new();
        if !missing_only {
            entries.extend(report.present.iter().map(|r| entry(*r, true)));
        }
        entries.extend(report.missing.iter().map(|r| entry(*r, false)));

        Self {
            total: report.total(),
            present: report.present.len(),
            missing: report.missing.len(),
            entries,
        }
    }
}

/// Check command runner
pub async fn run_check(args: CheckArgs) -> Result<CommandSummary> {
    let start_time = Instant::now();
    let config = prepare(&args.common)?;
    debug!("Check arguments: {:?}", args);

    let catalog = catalog_loader(&config)?
        .load_catalog(&config.catalog_source()?)
        .await?;
    let checker = build_checker(&config)?;

    let pb = optional_progress_bar(&args.common, catalog.len(), "Checking PDFs")?;
    let report = checker.check_all(catalog.records(), pb.as_ref()).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let summary = CheckSummary::from_report(&report, &checker, args.missing_only);

    configure_colors(&args.output);
    let rendered = match args.output.format {
        OutputFormat::Human => render_human(&summary),
        OutputFormat::Json => to_json(&summary)?,
        OutputFormat::Csv => render_csv(&summary),
    };
    emit(&args.output, &rendered)?;

    Ok(CommandSummary::new("check", summary.total, start_time.elapsed()))
}

fn render_human(summary: &CheckSummary) -> String {
    let mut output = String::new();
    for entry in &summary.entries {
        let marker = if entry.exists {
            "✓".green()
        } else {
            "✗".red()
        };
        output.push_str(&format!(
            "{} {} {}\n",
            marker,
            entry.filename,
            entry.path.as_deref().unwrap_or("(no path)").dimmed()
        ));
    }

    if !summary.entries.is_empty() {
        output.push('\n');
    }
    let missing = if summary.missing == 0 {
        summary.missing.to_string().green()
    } else {
        summary.missing.to_string().red()
    };
    output.push_str(&format!(
        "{} PDFs checked: {} present, {} missing\n",
        summary.total, summary.present, missing
    ));
    output
}

fn render_csv(summary: &CheckSummary) -> String {
    let mut csv = csv_row(&["filename", "subject", "path", "status"]);
    csv.push('\n');
    for entry in &summary.entries {
        csv.push_str(&csv_row(&[
            entry.filename.as_str(),
            entry.subject.as_str(),
            entry.path.as_deref().unwrap_or(""),
            if entry.exists { "present" } else { "missing" },
        ]));
        csv.push('\n');
    }
    csv
}
