//! Tests for maintenance jobs

mod clean_tests;
mod migrate_tests;
mod write_tests;

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `contents` as `worksheet_metadata.csv` in a fresh directory
pub fn catalog_file(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("worksheet_metadata.csv");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

/// Backup files written next to the catalog
pub fn backups(dir: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("worksheet_metadata_backup_") && n.ends_with(".csv"))
        })
        .collect();
    found.sort();
    found
}

pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}
