//! Migration from the legacy grade text column to grade flag columns

use super::{WriteOutcome, commit, join_lines, read_csv, split_lines};
use crate::app::models::{Grade, GradeSchema, GradeSet};
use crate::app::services::csv_line_parser::{format_line, parse_line};
use crate::constants::columns;
use crate::{Error, Result};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Result of a grade schema migration
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrateReport {
    /// Grade schema found before migrating
    pub schema_before: GradeSchema,
    /// Data rows rewritten
    pub rows: usize,
    /// Rows whose grade text named no recognised grade
    pub ungraded: usize,
    pub outcome: WriteOutcome,
}

impl MigrateReport {
    pub fn summary(&self) -> String {
        match self.schema_before {
            GradeSchema::Flags => "Catalog already uses grade flag columns".to_string(),
            _ => format!(
                "Migrated {} rows to grade flag columns ({} without grades)",
                self.rows, self.ungraded
            ),
        }
    }
}

/// Replace the `Grade Level` column with `isKinder,isFirst,isSecond`
///
/// The flag columns take the position of the text column. Every rewritten
/// line is re-serialised, blank lines are dropped and short rows are padded.
/// A catalog that already has flag columns is left alone; one without any
/// grade column is an error.
pub fn migrate_grades(csv_path: &Path, dry_run: bool) -> Result<MigrateReport> {
    info!("Migrating grade columns in {}", csv_path.display());

    let original = read_csv(csv_path)?;
    let lines = split_lines(&original);
    let headers = parse_line(lines.first().copied().unwrap_or(""));

    let mut report = MigrateReport {
        schema_before: GradeSchema::detect(&headers),
        ..Default::default()
    };

    match report.schema_before {
        GradeSchema::Flags => {
            info!("{}", report.summary());
            return Ok(report);
        }
        GradeSchema::Unspecified => {
            return Err(Error::catalog(format!(
                "{} has no '{}' column to migrate",
                csv_path.display(),
                columns::GRADE_LEVEL
            )));
        }
        GradeSchema::LegacyText => {}
    }

    let grade_idx = headers
        .iter()
        .position(|h| h == columns::GRADE_LEVEL)
        .ok_or_else(|| Error::catalog("Grade Level column disappeared"))?;

    let flag_headers: Vec<String> = columns::GRADE_FLAGS.iter().map(|c| c.to_string()).collect();
    let mut output = vec![format_line(&splice(&headers, grade_idx, flag_headers))];

    for line in lines.iter().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let mut values = parse_line(line);
        if values.len() < headers.len() {
            values.resize(headers.len(), String::new());
        }

        let grades = GradeSet::from_legacy_text(&values[grade_idx]);
        if grades.is_empty() {
            report.ungraded += 1;
        }
        let flags = Grade::ALL
            .iter()
            .map(|&grade| grades.flag_value(grade).to_string())
            .collect();

        output.push(format_line(&splice(&values, grade_idx, flags)));
        report.rows += 1;
    }

    let updated = join_lines(&output, &original);
    report.outcome = commit(csv_path, &original, &updated, dry_run)?;

    info!("{}", report.summary());
    Ok(report)
}

/// Copy of `values` with the value at `index` replaced by `replacement`
fn splice(values: &[String], index: usize, replacement: Vec<String>) -> Vec<String> {
    let mut spliced = Vec::with_capacity(values.len() + replacement.len());
    spliced.extend_from_slice(&values[..index]);
    spliced.extend(replacement);
    spliced.extend_from_slice(&values[index + 1..]);
    spliced
}
