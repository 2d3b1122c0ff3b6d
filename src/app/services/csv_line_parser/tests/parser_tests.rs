//! Behaviour tests for `parse_line` and `format_line`

use super::count_unquoted_commas;
use crate::app::services::csv_line_parser::{format_line, parse_line};

#[test]
fn test_simple_line() {
    let fields = parse_line("Addition Practice ,Math,Activity");
    assert_eq!(fields, vec!["Addition Practice", "Math", "Activity"]);
}

#[test]
fn test_quoted_field_keeps_commas() {
    let fields = parse_line(r#"Sight Words,Reading,Activity,"K, 1, 2""#);
    assert_eq!(fields.len(), 4);
    assert_eq!(fields[3], "K, 1, 2");
}

#[test]
fn test_quotes_are_not_emitted() {
    let fields = parse_line(r#""Shape Hunt",Math"#);
    assert_eq!(fields, vec!["Shape Hunt", "Math"]);
}

#[test]
fn test_whitespace_around_quotes_is_trimmed() {
    let fields = parse_line(r#"  "Ten Frames"  , Math "#);
    assert_eq!(fields, vec!["Ten Frames", "Math"]);
}

#[test]
fn test_empty_fields_are_preserved() {
    let fields = parse_line("a,,c,");
    assert_eq!(fields, vec!["a", "", "c", ""]);
}

#[test]
fn test_empty_line_yields_single_empty_field() {
    assert_eq!(parse_line(""), vec![""]);
}

#[test]
fn test_unbalanced_quote_swallows_rest_of_line() {
    // The opening quote is never closed, so the remaining commas are content
    let fields = parse_line(r#"Rhymes,"Reading, Games,Activity"#);
    assert_eq!(fields, vec!["Rhymes", "Reading, Games,Activity"]);
}

#[test]
fn test_doubled_quotes_collapse() {
    // Escaped quotes are not supported: "" simply toggles twice
    let fields = parse_line(r#"Say ""Hello"",Reading"#);
    assert_eq!(fields, vec!["Say Hello", "Reading"]);
}

#[test]
fn test_field_count_matches_comma_count() {
    let line = r#"Dot to Dot,Math,"Games, Puzzles",TRUE,FALSE"#;
    assert_eq!(parse_line(line).len(), 1 + count_unquoted_commas(line));
}

#[test]
fn test_format_line_quotes_commas() {
    let line = format_line(&["Sight Words", "K, 1", "Activity"]);
    assert_eq!(line, r#"Sight Words,"K, 1",Activity"#);
    assert_eq!(parse_line(&line), vec!["Sight Words", "K, 1", "Activity"]);
}

#[test]
fn test_format_line_drops_quotes() {
    let line = format_line(&[r#"The "Best" Game"#]);
    assert_eq!(line, "The Best Game");
}
