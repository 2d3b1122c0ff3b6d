//! Tests for backups and atomic writes

use super::read;
use crate::app::services::maintenance::{backup_path, join_lines, split_lines, write_atomically};
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_backup_path_sits_next_to_original() {
    let path = Path::new("public/worksheets/worksheet_metadata.csv");

    assert_eq!(
        backup_path(path, 1_700_000_000_123),
        Path::new("public/worksheets/worksheet_metadata_backup_1700000000123.csv")
    );
    assert_eq!(
        backup_path(Path::new("catalog"), 5),
        Path::new("catalog_backup_5.csv")
    );
}

#[test]
fn test_write_atomically_replaces_contents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("worksheet_metadata.csv");
    std::fs::write(&path, "old").unwrap();

    write_atomically(&path, "new contents\n").unwrap();

    assert_eq!(read(&path), "new contents\n");
    let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn test_split_and_join_lines() {
    assert_eq!(split_lines("a\r\nb\n"), vec!["a", "b"]);
    assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
    assert_eq!(join_lines(&["a", "b"], "x\n"), "a\nb\n");
    assert_eq!(join_lines(&["a", "b"], "x"), "a\nb");
}
