//! Tests for the catalog line parser

mod parser_tests;

/// Count separators outside quotes the way the parser sees them
pub fn count_unquoted_commas(line: &str) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => count += 1,
            _ => {}
        }
    }
    count
}
