//! Removal of whitespace before the `.pdf` extension in filenames

use super::{WriteOutcome, commit, join_lines, read_csv, split_lines};
use crate::Result;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::LazyLock;
use tracing::info;

static SPACE_BEFORE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+\.pdf$").expect("extension pattern is valid"));

/// One corrected filename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilenameFix {
    /// 1-based line number
    pub line: usize,
    pub original: String,
    pub fixed: String,
}

/// Result of a filename fix run
#[derive(Debug, Clone, Default, Serialize)]
pub struct FixReport {
    pub fixed: Vec<FilenameFix>,
    pub outcome: WriteOutcome,
}

impl FixReport {
    pub fn summary(&self) -> String {
        format!(
            "Fixed {} filenames with whitespace before .pdf",
            self.fixed.len()
        )
    }
}

/// Fixed form of a raw first field, `None` when it needs no change
pub fn fixed_filename(field: &str) -> Option<String> {
    let fixed = SPACE_BEFORE_EXTENSION.replace(field, ".pdf");
    (fixed != field).then(|| fixed.into_owned())
}

/// Rewrite `Name .pdf` as `Name.pdf` in the first field of every data row
///
/// Only the text before the first comma is touched. The header and blank
/// lines are kept as they are.
pub fn fix_filenames(csv_path: &Path, dry_run: bool) -> Result<FixReport> {
    info!("Fixing filenames in {}", csv_path.display());

    let original = read_csv(csv_path)?;
    let mut report = FixReport::default();

    let output: Vec<String> = split_lines(&original)
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            if index == 0 || line.trim().is_empty() {
                return line.to_string();
            }

            let (first, rest) = match line.split_once(',') {
                Some((first, rest)) => (first, Some(rest)),
                None => (line, None),
            };
            let Some(fixed) = fixed_filename(first) else {
                return line.to_string();
            };

            info!("Fixed: \"{}\" -> \"{}\"", first, fixed);
            let rewritten = match rest {
                Some(rest) => format!("{},{}", fixed, rest),
                None => fixed.clone(),
            };
            report.fixed.push(FilenameFix {
                line: index + 1,
                original: first.to_string(),
                fixed,
            });
            rewritten
        })
        .collect();

    // Untouched files keep their exact bytes, line endings included
    let updated = if report.fixed.is_empty() {
        original.clone()
    } else {
        join_lines(&output, &original)
    };
    report.outcome = commit(csv_path, &original, &updated, dry_run)?;

    info!("{}", report.summary());
    Ok(report)
}
