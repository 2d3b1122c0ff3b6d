//! Tests for missing-file cleanup

use super::{backups, catalog_file, read};
use crate::Error;
use crate::app::services::maintenance::clean::{clean_missing, list_pdfs};
use std::path::Path;

const CATALOG: &str = "\
Filename,Category,Subject,Description
Counting Fun.pdf,Activity,Math,Count
  Shape Hunt  ,Games,math,Shapes
Missing.pdf,Activity,Math,x

Rhyme Time.pdf,Activity,Reading,y
,Activity,Math,z
Lonely
";

fn publish(worksheets: &Path, subject: &str, names: &[&str]) {
    let dir = worksheets.join(subject);
    std::fs::create_dir_all(&dir).unwrap();
    for name in names {
        std::fs::write(dir.join(name), b"%PDF-1.4").unwrap();
    }
}

#[test]
fn test_clean_drops_missing_and_malformed_rows() {
    let (dir, csv) = catalog_file(CATALOG);
    let worksheets = dir.path().join("worksheets");
    publish(&worksheets, "math", &["Counting Fun.pdf", "Shape Hunt.pdf", "notes.txt"]);
    publish(&worksheets, "reading", &["Rhyme Time.pdf"]);

    let report = clean_missing(&csv, &worksheets, false).unwrap();

    assert_eq!(report.kept, 3);
    assert_eq!(report.removed, vec!["Missing.pdf"]);
    assert_eq!(report.malformed, vec![7, 8]);
    assert_eq!(report.blank_lines, 1);
    assert_eq!(report.listed.get("math"), Some(&2));
    assert_eq!(report.listed.get("reading"), Some(&1));

    assert_eq!(
        read(&csv),
        "\
Filename,Category,Subject,Description
Counting Fun.pdf,Activity,Math,Count
Shape Hunt  ,Games,math,Shapes
Rhyme Time.pdf,Activity,Reading,y
"
    );
}

#[test]
fn test_clean_never_lists_outside_worksheets_dir() {
    let (dir, csv) = catalog_file(
        "Filename,Subject\nsecret.pdf,..\nCounting Fun.pdf,Math\nother.pdf,math/../..\n",
    );
    let worksheets = dir.path().join("public").join("worksheets");
    publish(&worksheets, "math", &["Counting Fun.pdf"]);
    std::fs::write(dir.path().join("public").join("secret.pdf"), b"%PDF-1.4").unwrap();

    let report = clean_missing(&csv, &worksheets, false).unwrap();

    assert_eq!(report.kept, 1);
    assert_eq!(report.malformed, vec![2, 4]);
    assert!(report.removed.is_empty());
    assert_eq!(report.listed.len(), 1);
    assert_eq!(read(&csv), "Filename,Subject\nCounting Fun.pdf,Math\n");
}

#[test]
fn test_clean_backs_up_original_first() {
    let (dir, csv) = catalog_file(CATALOG);
    let worksheets = dir.path().join("worksheets");
    publish(&worksheets, "math", &["Counting Fun.pdf"]);

    let report = clean_missing(&csv, &worksheets, false).unwrap();

    let found = backups(dir.path());
    assert_eq!(found.len(), 1);
    assert_eq!(report.outcome.backup_path.as_ref(), Some(&found[0]));
    assert_eq!(read(&found[0]), CATALOG);
    assert!(report.outcome.written());
}

#[test]
fn test_clean_dry_run_writes_nothing() {
    let (dir, csv) = catalog_file(CATALOG);
    let worksheets = dir.path().join("worksheets");
    publish(&worksheets, "math", &["Counting Fun.pdf"]);

    let report = clean_missing(&csv, &worksheets, true).unwrap();

    assert!(report.outcome.dry_run);
    assert!(report.outcome.changed);
    assert!(!report.outcome.written());
    assert_eq!(report.kept, 1);
    assert_eq!(read(&csv), CATALOG);
    assert!(backups(dir.path()).is_empty());
}

#[test]
fn test_clean_unknown_subject_directory_removes_rows() {
    let (dir, csv) = catalog_file("Filename,Subject\nCells.pdf,Science\n");
    let worksheets = dir.path().join("worksheets");

    let report = clean_missing(&csv, &worksheets, false).unwrap();

    assert_eq!(report.removed, vec!["Cells.pdf"]);
    assert_eq!(read(&csv), "Filename,Subject\n");
}

#[test]
fn test_clean_leaves_complete_catalog_untouched() {
    let contents = "Filename,Subject\nCounting Fun.pdf,Math\n";
    let (dir, csv) = catalog_file(contents);
    let worksheets = dir.path().join("worksheets");
    publish(&worksheets, "math", &["Counting Fun.pdf"]);

    let report = clean_missing(&csv, &worksheets, false).unwrap();

    assert!(!report.outcome.changed);
    assert!(backups(dir.path()).is_empty());
    assert_eq!(read(&csv), contents);
}

#[test]
fn test_clean_requires_filename_and_subject_columns() {
    let (dir, csv) = catalog_file("Name,Topic\na,b\n");
    let result = clean_missing(&csv, &dir.path().join("worksheets"), false);

    assert!(matches!(result, Err(Error::Catalog { .. })));
}

#[test]
fn test_clean_missing_catalog_is_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = clean_missing(&dir.path().join("absent.csv"), dir.path(), false);

    assert!(matches!(result, Err(Error::FileNotFound { .. })));
}

#[test]
fn test_list_pdfs_ignores_nested_and_other_files() {
    let dir = tempfile::TempDir::new().unwrap();
    publish(dir.path(), "math", &["a.pdf", "B.PDF", "c.txt"]);
    publish(&dir.path().join("math"), "nested", &["deep.pdf"]);

    let files = list_pdfs(&dir.path().join("math"));

    assert_eq!(files.len(), 2);
    assert!(files.contains("a.pdf"));
    assert!(files.contains("B.PDF"));
    assert!(list_pdfs(&dir.path().join("absent")).is_empty());
}
