//! Offline maintenance jobs for the catalog CSV
//!
//! Every job follows the same steps: read the CSV, compute the new content and
//! a report, then (unless it is a dry run or nothing changed) copy the
//! original to `{stem}_backup_{unix millis}.csv` next to it and replace the
//! CSV atomically through a temporary file in the same directory.
//!
//! ## Jobs
//!
//! - [`clean`] - Drop rows whose PDF is not on disk
//! - [`fix_filenames`] - Remove whitespace before a trailing `.pdf`
//! - [`migrate`] - Rewrite legacy `Grade Level` text as grade flag columns

pub mod clean;
pub mod fix_filenames;
pub mod migrate;

#[cfg(test)]
mod tests;

pub use clean::{CleanReport, clean_missing};
pub use fix_filenames::{FilenameFix, FixReport, fix_filenames};
pub use migrate::{MigrateReport, migrate_grades};

use crate::constants::BACKUP_INFIX;
use crate::{Error, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What a job did to the CSV file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteOutcome {
    /// The job only computed its report
    pub dry_run: bool,
    /// The computed content differs from the original
    pub changed: bool,
    /// Backup written before the CSV was replaced
    pub backup_path: Option<PathBuf>,
}

impl WriteOutcome {
    /// Whether the CSV on disk was replaced
    pub fn written(&self) -> bool {
        self.backup_path.is_some()
    }
}

/// Read a CSV file for a maintenance job
pub(crate) fn read_csv(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Error::file_not_found(path.display().to_string()))
        }
        Err(e) => Err(Error::io(format!("Failed to read {}", path.display()), e)),
    }
}

/// Lines of a CSV document without line terminators
///
/// A final newline ends the last line rather than starting an empty one.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    text.strip_suffix('\n')
        .unwrap_or(text)
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Join lines, ending with a newline when the original text did
pub(crate) fn join_lines<S: AsRef<str>>(lines: &[S], original: &str) -> String {
    let parts: Vec<&str> = lines.iter().map(|line| line.as_ref()).collect();
    let mut joined = parts.join("\n");
    if original.ends_with('\n') {
        joined.push('\n');
    }
    joined
}

/// Backup location for a CSV taken at `millis`
pub fn backup_path(path: &Path, millis: i64) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_string());
    path.with_file_name(format!("{}{}{}.{}", stem, BACKUP_INFIX, millis, extension))
}

/// Replace `path` with `contents` via a temporary file in the same directory
pub fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(&parent).map_err(|e| {
        Error::io(
            format!("Failed to create temporary file in {}", parent.display()),
            e,
        )
    })?;
    temp.write_all(contents.as_bytes())
        .and_then(|_| temp.flush())
        .map_err(|e| Error::io("Failed to write temporary file", e))?;
    temp.persist(path)
        .map_err(|e| Error::io(format!("Failed to replace {}", path.display()), e.error))?;
    Ok(())
}

/// Back up the original and write the updated content unless nothing changed
pub(crate) fn commit(
    path: &Path,
    original: &str,
    updated: &str,
    dry_run: bool,
) -> Result<WriteOutcome> {
    let changed = original != updated;
    let mut outcome = WriteOutcome {
        dry_run,
        changed,
        backup_path: None,
    };

    if !changed {
        debug!("{} is already up to date", path.display());
        return Ok(outcome);
    }
    if dry_run {
        info!("Dry run: {} left untouched", path.display());
        return Ok(outcome);
    }

    let backup = backup_path(path, chrono::Utc::now().timestamp_millis());
    fs::write(&backup, original)
        .map_err(|e| Error::io(format!("Failed to write backup {}", backup.display()), e))?;
    info!("Backup created: {}", backup.display());

    write_atomically(path, updated)?;
    info!("Rewrote {}", path.display());

    outcome.backup_path = Some(backup);
    Ok(outcome)
}
