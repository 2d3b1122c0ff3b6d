//! Detail links carrying a full record

use crate::app::models::{RawRecord, WorksheetRecord};
use crate::constants::{DETAIL_ROUTE, columns};
use tracing::debug;
use url::form_urlencoded;

/// Link to the detail view of the record at `index`
///
/// Every column is form-encoded into the query string in header order, so
/// the link alone is enough to rebuild the record.
pub fn detail_href(index: usize, record: &WorksheetRecord) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(record.fields.iter())
        .finish();
    format!("{}/{}?{}", DETAIL_ROUTE, index, query)
}

/// Rebuild a record from a detail link, its query string, or a bare query
///
/// Returns `None` when no `Filename` parameter is present, which the site
/// shows as "Resource Not Found". Repeated parameters keep their first value.
pub fn record_from_detail_url(input: &str) -> Option<WorksheetRecord> {
    let mut fields = RawRecord::new();
    for (key, value) in form_urlencoded::parse(query_part(input).as_bytes()) {
        fields.entry(key.into_owned()).or_insert_with(|| value.into_owned());
    }

    let has_filename = fields
        .get(columns::FILENAME)
        .is_some_and(|name| !name.trim().is_empty());
    if !has_filename {
        debug!("Detail link has no {} parameter", columns::FILENAME);
        return None;
    }

    Some(WorksheetRecord::from_raw(fields))
}

/// Record index encoded in the path of a detail link
pub fn detail_index(input: &str) -> Option<usize> {
    let path = input.split(['?', '#']).next().unwrap_or("");
    let (_, index) = path.rsplit_once(&format!("{}/", DETAIL_ROUTE))?;
    index.trim_end_matches('/').parse().ok()
}

fn query_part(input: &str) -> &str {
    let without_fragment = input.split('#').next().unwrap_or("");
    match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None if without_fragment.contains('=') => without_fragment,
        None => "",
    }
}
