//! Tests for grade schema migration

use super::{backups, catalog_file, read};
use crate::Error;
use crate::app::models::{Catalog, Grade, GradeSchema};
use crate::app::services::maintenance::migrate::migrate_grades;

const LEGACY: &str = "\
Filename,Grade Level,Subject
Counting Fun,\"K, 1\",Math
Shape Hunt,2,Math
Odd,Grade 3,Reading

Short
";

#[test]
fn test_migrate_replaces_grade_text_with_flags() {
    let (dir, csv) = catalog_file(LEGACY);

    let report = migrate_grades(&csv, false).unwrap();

    assert_eq!(report.schema_before, GradeSchema::LegacyText);
    assert_eq!(report.rows, 4);
    assert_eq!(report.ungraded, 2);
    assert_eq!(
        read(&csv),
        "\
Filename,isKinder,isFirst,isSecond,Subject
Counting Fun,TRUE,TRUE,FALSE,Math
Shape Hunt,FALSE,FALSE,TRUE,Math
Odd,FALSE,FALSE,FALSE,Reading
Short,FALSE,FALSE,FALSE,
"
    );
    assert_eq!(read(&backups(dir.path())[0]), LEGACY);
}

#[test]
fn test_migrated_catalog_keeps_grades() {
    let (_dir, csv) = catalog_file(LEGACY);
    let before = Catalog::from_csv_text(LEGACY);

    migrate_grades(&csv, false).unwrap();
    let after = Catalog::from_csv_text(&read(&csv));

    assert_eq!(after.schema, GradeSchema::Flags);
    assert_eq!(after.len(), before.len());
    for (old, new) in before.records.iter().zip(&after.records) {
        assert_eq!(old.filename, new.filename);
        assert_eq!(old.grades, new.grades);
    }
    assert!(after.records[0].grades.contains(Grade::Kindergarten));
    assert!(after.records[0].grades.contains(Grade::First));
}

#[test]
fn test_migrate_is_noop_for_flag_catalog() {
    let contents = "Filename,Subject,isKinder,isFirst,isSecond\nA,Math,TRUE,FALSE,FALSE\n";
    let (dir, csv) = catalog_file(contents);

    let report = migrate_grades(&csv, false).unwrap();

    assert_eq!(report.schema_before, GradeSchema::Flags);
    assert_eq!(report.rows, 0);
    assert!(!report.outcome.changed);
    assert_eq!(read(&csv), contents);
    assert!(backups(dir.path()).is_empty());
}

#[test]
fn test_migrate_dry_run_writes_nothing() {
    let (dir, csv) = catalog_file(LEGACY);

    let report = migrate_grades(&csv, true).unwrap();

    assert_eq!(report.rows, 4);
    assert!(report.outcome.changed);
    assert_eq!(read(&csv), LEGACY);
    assert!(backups(dir.path()).is_empty());
}

#[test]
fn test_migrate_without_grade_column_fails() {
    let (_dir, csv) = catalog_file("Filename,Subject\nA,Math\n");

    let result = migrate_grades(&csv, false);

    assert!(matches!(result, Err(Error::Catalog { .. })));
}
