//! Tests for record predicates and combined queries

use super::{flag_catalog, titles};
use crate::app::models::{Catalog, Category, Grade, RawRecord, WorksheetRecord};
use crate::app::services::catalog_query::filters::*;

fn record(pairs: &[(&str, &str)]) -> WorksheetRecord {
    let fields: RawRecord = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    WorksheetRecord::from_raw(fields)
}

#[test]
fn test_subject_listing_is_case_insensitive() {
    let catalog = flag_catalog();

    let math = catalog.subject_listing("Math");
    assert_eq!(titles(&math), vec!["Counting Fun", "Number Bonds", "Shape Hunt"]);

    assert_eq!(catalog.subject_listing("math").len(), 3);
    assert_eq!(catalog.subject_listing("MATH").len(), 3);
}

#[test]
fn test_parent_guides_are_segregated() {
    let catalog = flag_catalog();

    assert!(catalog.subject_listing("Parent Resources Guide").is_empty());

    let guides = catalog.parent_guides();
    assert_eq!(titles(&guides), vec!["Reading at Home"]);
}

#[test]
fn test_grade_flags_filter() {
    let ws = record(&[
        ("Filename", "Counting Fun"),
        ("isKinder", "TRUE"),
        ("isFirst", "FALSE"),
        ("isSecond", "TRUE"),
    ]);

    assert!(!matches_grade(&ws, Grade::First));
    assert!(matches_grade(&ws, Grade::Kindergarten));
    assert!(matches_grade(&ws, Grade::Second));
}

#[test]
fn test_grade_query_parses_user_input() {
    let catalog = flag_catalog();

    let query = CatalogQuery::new().grade("1".parse().unwrap());
    assert_eq!(titles(&catalog.query(&query)), vec!["Number Bonds", "Shape Hunt"]);

    let query = CatalogQuery::new().grade("K".parse().unwrap());
    assert_eq!(
        titles(&catalog.query(&query)),
        vec!["Counting Fun", "Shape Hunt", "Rhyming Pairs"]
    );
}

#[test]
fn test_legacy_grade_text_filter() {
    let catalog = Catalog::from_csv_text(
        "Filename,Grade Level,Subject\nA,\"K, 1\",Math\nB,2,Math\nC,,Math\n",
    );
    let query = CatalogQuery::new().grade(Grade::First);
    assert_eq!(titles(&catalog.query(&query)), vec!["A"]);
}

#[test]
fn test_category_alias_is_equivalent() {
    let catalog = flag_catalog();
    let query = CatalogQuery::new().category(Category::classify("Games"));
    assert_eq!(
        titles(&catalog.query(&query)),
        vec!["Number Bonds", "Shape Hunt", "Sight Word Bingo"]
    );

    let query = CatalogQuery::new().category(Category::classify("Ganes"));
    assert_eq!(catalog.query(&query).len(), 3);
}

#[test]
fn test_search_scopes() {
    let ws = record(&[("Filename", "Shape Hunt"), ("Category", "Games")]);

    assert!(matches_search(&ws, "shape", SearchScope::Filename));
    assert!(!matches_search(&ws, "game", SearchScope::Filename));
    assert!(matches_search(&ws, "GAME", SearchScope::Category));
    assert!(matches_search(&ws, "game", SearchScope::Both));
    assert!(matches_search(&ws, "   ", SearchScope::Filename));
    assert!(!matches_search(&ws, "rhyme", SearchScope::Both));
}

#[test]
fn test_has_video_sentinels() {
    assert!(!has_video(&record(&[("Video Link", "n/a")])));
    assert!(!has_video(&record(&[("Video Link", "  ")])));
    assert!(!has_video(&record(&[("Filename", "No video column")])));
    assert!(has_video(&record(&[("Video Link", "https://youtu.be/x")])));
}

#[test]
fn test_combined_query() {
    let catalog = flag_catalog();
    let query = CatalogQuery::new()
        .subject("math")
        .grade(Grade::Kindergarten)
        .with_video();

    assert_eq!(titles(&catalog.query(&query)), vec!["Counting Fun", "Shape Hunt"]);

    let query = query.search("hunt", SearchScope::Filename);
    assert_eq!(titles(&catalog.query(&query)), vec!["Shape Hunt"]);
}

#[test]
fn test_parent_guide_query() {
    let catalog = flag_catalog();
    let query = CatalogQuery::new().parent_guides();
    assert_eq!(titles(&catalog.query(&query)), vec!["Reading at Home"]);
}

#[test]
fn test_empty_query_matches_everything() {
    let catalog = flag_catalog();
    assert_eq!(catalog.query(&CatalogQuery::new()).len(), catalog.len());
}
