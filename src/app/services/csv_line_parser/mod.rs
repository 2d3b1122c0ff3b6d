//! Quote-aware line parser for the worksheet catalog CSV
//!
//! The catalog is a hand-maintained spreadsheet export, so the parser is
//! deliberately permissive: it never rejects a line. Double quotes group
//! commas into a single field and are themselves dropped from the output.
//!
//! ## Usage
//!
//! ```rust
//! use worksheet_catalog::app::services::csv_line_parser::parse_line;
//!
//! let fields = parse_line(r#"Number Bonds,"Math, Games",Activity"#);
//! assert_eq!(fields, vec!["Number Bonds", "Math, Games", "Activity"]);
//! ```

pub mod parser;

#[cfg(test)]
mod tests;

pub use parser::{format_line, parse_line};
