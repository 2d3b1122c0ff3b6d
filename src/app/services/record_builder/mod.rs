//! Record building for catalog CSV text
//!
//! Zips the header row with every data row to produce column-name keyed
//! records, then wraps them in typed [`WorksheetRecord`]s or [`Video`]s.
//! Blank lines are skipped before parsing; short rows are padded with empty
//! values and surplus values are ignored. Nothing here can fail.

use crate::app::models::{Catalog, GradeSchema, RawRecord, Video, WorksheetRecord, present_value};
use crate::app::services::csv_line_parser::parse_line;
use crate::constants::columns;
use tracing::{debug, info};

#[cfg(test)]
mod tests;

/// Header and rows of a parsed CSV document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRecord>,
}

impl CsvTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }
}

/// Parse CSV text into a header and column-keyed rows
pub fn build_table(text: &str) -> CsvTable {
    let mut lines = text.split('\n').filter(|line| !line.trim().is_empty());

    let Some(header_line) = lines.next() else {
        debug!("CSV text has no header line");
        return CsvTable::default();
    };

    let headers = parse_line(header_line);
    let rows: Vec<RawRecord> = lines
        .map(|line| zip_row(&headers, parse_line(line)))
        .collect();

    debug!(
        "Built {} rows over {} columns",
        rows.len(),
        headers.len()
    );

    CsvTable { headers, rows }
}

/// Pair header names with row values, padding missing values with ""
pub fn zip_row(headers: &[String], values: Vec<String>) -> RawRecord {
    let mut values = values.into_iter();
    let mut record = RawRecord::with_capacity(headers.len());
    for header in headers {
        record.insert(header.clone(), values.next().unwrap_or_default());
    }
    record
}

impl Catalog {
    /// Build a typed catalog from CSV text
    pub fn from_csv_text(text: &str) -> Self {
        let table = build_table(text);
        let schema = GradeSchema::detect(&table.headers);
        let records: Vec<WorksheetRecord> =
            table.rows.into_iter().map(WorksheetRecord::from_raw).collect();

        info!(
            "Loaded catalog: {} records, grade schema {:?}",
            records.len(),
            schema
        );

        Self {
            headers: table.headers,
            schema,
            records,
        }
    }
}

/// Build a video list from CSV text
///
/// Accepts `Title`/`Link` columns, falling back to `Video Title`/`Video Link`.
/// Rows without a usable link are dropped.
pub fn videos_from_csv_text(text: &str) -> Vec<Video> {
    let table = build_table(text);
    let title_column = if table.has_column(columns::TITLE) {
        columns::TITLE
    } else {
        columns::VIDEO_TITLE
    };
    let link_column = if table.has_column(columns::LINK) {
        columns::LINK
    } else {
        columns::VIDEO_LINK
    };

    let videos: Vec<Video> = table
        .rows
        .iter()
        .filter_map(|row| {
            let link = present_value(row.get(link_column).map(String::as_str).unwrap_or(""))?;
            let title = row.get(title_column).cloned().unwrap_or_default();
            Some(Video::new(title, link))
        })
        .collect();

    debug!("Loaded {} videos", videos.len());
    videos
}
