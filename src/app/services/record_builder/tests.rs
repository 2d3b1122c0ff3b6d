//! Tests for record building

use super::*;
use crate::app::models::{Grade, GradeSchema};

#[test]
fn test_trailing_space_is_trimmed() {
    let table = build_table("Filename,Subject,Category\nAddition Practice ,Math,Activity\n");

    assert_eq!(table.headers, vec!["Filename", "Subject", "Category"]);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0]["Filename"], "Addition Practice");
    assert_eq!(table.rows[0]["Subject"], "Math");
    assert_eq!(table.rows[0]["Category"], "Activity");
}

#[test]
fn test_blank_lines_are_skipped() {
    let table = build_table("\n  \nFilename,Subject\n\nA,Math\n   \nB,Reading\n");
    assert_eq!(table.headers, vec!["Filename", "Subject"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1]["Filename"], "B");
}

#[test]
fn test_short_rows_are_padded() {
    let table = build_table("Filename,Subject,Category,Video Link\nShapes,Math\n");
    let row = &table.rows[0];
    assert_eq!(row.len(), 4);
    assert_eq!(row["Category"], "");
    assert_eq!(row["Video Link"], "");
}

#[test]
fn test_long_rows_drop_surplus_values() {
    let table = build_table("Filename,Subject\nShapes,Math,extra,values\n");
    assert_eq!(table.rows[0].len(), 2);
}

#[test]
fn test_windows_line_endings() {
    let table = build_table("Filename,Subject\r\nShapes,Math\r\n");
    assert_eq!(table.headers, vec!["Filename", "Subject"]);
    assert_eq!(table.rows[0]["Subject"], "Math");
}

#[test]
fn test_empty_text_yields_empty_table() {
    assert_eq!(build_table(""), CsvTable::default());
    assert_eq!(build_table("\n\n"), CsvTable::default());
}

#[test]
fn test_header_order_is_preserved() {
    let table = build_table("Subject,Filename,Category\nMath,Shapes,Activity\n");
    let keys: Vec<&str> = table.rows[0].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Subject", "Filename", "Category"]);
}

#[test]
fn test_catalog_with_flag_schema() {
    let catalog = Catalog::from_csv_text(
        "Filename,Subject,Category,isKinder,isFirst,isSecond\n\
         Counting Fun,Math,Activity,TRUE,FALSE,TRUE\n",
    );

    assert_eq!(catalog.schema, GradeSchema::Flags);
    let record = &catalog.records()[0];
    assert!(record.grades.contains(Grade::Kindergarten));
    assert!(!record.grades.contains(Grade::First));
    assert!(record.grades.contains(Grade::Second));
}

#[test]
fn test_catalog_with_legacy_schema() {
    let catalog = Catalog::from_csv_text(
        "Filename,Grade Level,Subject,Category\nSight Words,\"K, 1\",Reading,Activity\n",
    );

    assert_eq!(catalog.schema, GradeSchema::LegacyText);
    assert_eq!(catalog.records()[0].grades.labels(), vec!["K", "Grade 1"]);
}

#[test]
fn test_videos_from_csv_text() {
    let videos = videos_from_csv_text(
        "Title,Link\nCounting to Ten,https://youtu.be/abcdefghijk\nPending,n/a\nNo Link,\n",
    );
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].title, "Counting to Ten");
}

#[test]
fn test_videos_fall_back_to_catalog_columns() {
    let videos = videos_from_csv_text(
        "Video Title,Video Link\nRhymes,https://www.youtube.com/watch?v=abcdefghijk\n",
    );
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].title, "Rhymes");
}
