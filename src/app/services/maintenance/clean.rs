//! Removal of rows whose PDF is missing from disk

use super::{WriteOutcome, commit, join_lines, read_csv, split_lines};
use crate::app::services::csv_line_parser::parse_line;
use crate::app::services::existence_checker::path::{is_safe_segment, with_pdf_extension};
use crate::constants::columns;
use crate::{Error, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Result of a missing-file cleanup
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanReport {
    /// Rows kept because their PDF exists
    pub kept: usize,
    /// Filenames of rows dropped because their PDF is missing
    pub removed: Vec<String>,
    /// Line numbers (1-based) of rows dropped for lacking a usable filename or subject
    pub malformed: Vec<usize>,
    /// Blank lines dropped
    pub blank_lines: usize,
    /// PDF files found per subject directory
    pub listed: BTreeMap<String, usize>,
    pub outcome: WriteOutcome,
}

impl CleanReport {
    pub fn summary(&self) -> String {
        format!(
            "Cleanup Summary: {} kept | {} removed | {} malformed | {} blank lines",
            self.kept,
            self.removed.len(),
            self.malformed.len(),
            self.blank_lines
        )
    }
}

/// Drop catalog rows whose PDF is not in `{worksheets_dir}/{subject}`
///
/// The header is kept verbatim. Kept rows are written trimmed. Rows with a
/// blank filename or subject, or too few fields to have them, are dropped and
/// counted as malformed.
pub fn clean_missing(csv_path: &Path, worksheets_dir: &Path, dry_run: bool) -> Result<CleanReport> {
    info!(
        "Cleaning {} against PDFs under {}",
        csv_path.display(),
        worksheets_dir.display()
    );

    let original = read_csv(csv_path)?;
    let lines = split_lines(&original);
    let header = lines.first().copied().unwrap_or("");
    let headers = parse_line(header);

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::catalog(format!("CSV header has no '{}' column", name)))
    };
    let filename_idx = column(columns::FILENAME)?;
    let subject_idx = column(columns::SUBJECT)?;

    let mut report = CleanReport::default();
    let mut listings: HashMap<String, HashSet<String>> = HashMap::new();
    let mut output = vec![header.to_string()];

    for (offset, line) in lines.iter().enumerate().skip(1) {
        let line_number = offset + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            report.blank_lines += 1;
            continue;
        }

        let fields = parse_line(trimmed);
        let filename = fields.get(filename_idx).map(String::as_str).unwrap_or("");
        let subject = fields.get(subject_idx).map(String::as_str).unwrap_or("");
        if filename.is_empty() || subject.is_empty() {
            debug!("Line {} has no filename or subject, dropping", line_number);
            report.malformed.push(line_number);
            continue;
        }

        let subject_dir = subject.to_lowercase();
        if !is_safe_segment(&subject_dir) {
            warn!("Line {} has an unusable subject '{}', dropping", line_number, subject);
            report.malformed.push(line_number);
            continue;
        }
        let listing = listings
            .entry(subject_dir.clone())
            .or_insert_with(|| list_pdfs(&worksheets_dir.join(&subject_dir)));

        if listing.contains(&with_pdf_extension(filename)) {
            debug!("Keeping: {}", filename);
            report.kept += 1;
            output.push(trimmed.to_string());
        } else {
            info!("Removing: {} (file not found)", filename);
            report.removed.push(filename.to_string());
        }
    }

    report.listed = listings
        .iter()
        .map(|(subject, files)| (subject.clone(), files.len()))
        .collect();

    let updated = join_lines(&output, &original);
    report.outcome = commit(csv_path, &original, &updated, dry_run)?;

    info!("{}", report.summary());
    Ok(report)
}

/// Names of the PDF files directly inside `dir`
pub fn list_pdfs(dir: &Path) -> HashSet<String> {
    if !dir.is_dir() {
        warn!("Worksheet directory {} does not exist", dir.display());
        return HashSet::new();
    }

    let files: HashSet<String> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();

    debug!("Found {} PDFs in {}", files.len(), dir.display());
    files
}
