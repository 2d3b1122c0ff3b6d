//! Line splitting and joining
//!
//! A single `in_quotes` flag decides whether a comma separates fields.
//! Quote characters only toggle the flag, so a literal quote inside a field
//! cannot be represented. Unbalanced quotes are not an error: the rest of the
//! line is simply read with whatever state the flag ended up in.

const QUOTE: char = '"';
const SEPARATOR: char = ',';

/// Split one CSV line into trimmed field values
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            QUOTE => in_quotes = !in_quotes,
            SEPARATOR if !in_quotes => {
                fields.push(finish_field(&current));
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    fields.push(finish_field(&current));
    fields
}

/// Join field values into one CSV line that `parse_line` reads back
///
/// Fields containing a comma are wrapped in quotes. Quote characters are
/// dropped since the parser has no way to represent them.
pub fn format_line<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|field| {
            let value: String = field.as_ref().chars().filter(|&c| c != QUOTE).collect();
            if value.contains(SEPARATOR) {
                format!("{QUOTE}{value}{QUOTE}")
            } else {
                value
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Trim the accumulated value and strip a wrapping quote pair if one survived
fn finish_field(raw: &str) -> String {
    strip_wrapping_quotes(raw.trim()).to_string()
}

fn strip_wrapping_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with(QUOTE) && value.ends_with(QUOTE) {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
