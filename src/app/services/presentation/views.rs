//! Card and detail views

use super::detail::detail_href;
use crate::app::models::WorksheetRecord;
use crate::app::services::catalog_query::{embed_url, youtube_video_id};
use crate::app::services::existence_checker::ResourcePath;
use serde::Serialize;

/// Link to a record's PDF, `None` when filename or subject is blank
pub fn pdf_href(prefix: &str, record: &WorksheetRecord) -> Option<String> {
    ResourcePath::for_worksheet(prefix, &record.filename, &record.subject)
        .map(|path| path.url_path())
}

/// Link back to the listing page of a subject
pub fn subject_href(subject: &str) -> String {
    format!("/{}", subject.trim().to_lowercase())
}

/// A worksheet as shown in a listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorksheetCard {
    pub index: usize,
    pub title: String,
    pub subject: String,
    pub category: String,
    pub grades: Vec<&'static str>,
    pub has_video: bool,
    pub detail_href: String,
    pub pdf_href: Option<String>,
}

impl WorksheetCard {
    pub fn new(index: usize, record: &WorksheetRecord, prefix: &str) -> Self {
        Self {
            index,
            title: record.display_title().to_string(),
            subject: record.subject.clone(),
            category: record.category_badge().to_string(),
            grades: record.grades.labels(),
            has_video: record.has_video(),
            detail_href: detail_href(index, record),
            pdf_href: pdf_href(prefix, record),
        }
    }
}

/// Everything the detail page shows for one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub title: String,
    pub subject: String,
    pub subject_href: String,
    pub category: String,
    pub grades: Vec<&'static str>,
    pub description: Option<String>,
    pub video_title: Option<String>,
    pub video_link: Option<String>,
    pub video_embed: Option<String>,
    pub pdf_href: Option<String>,
}

impl DetailView {
    pub fn new(record: &WorksheetRecord, prefix: &str) -> Self {
        let video_embed = record
            .video_link
            .as_deref()
            .and_then(youtube_video_id)
            .map(|id| embed_url(&id));

        Self {
            title: record.display_title().trim().to_string(),
            subject: record.subject.clone(),
            subject_href: subject_href(&record.subject),
            category: record.category_badge().to_string(),
            grades: record.grades.labels(),
            description: record.description.clone(),
            // A title without a link is not shown
            video_title: record
                .video_link
                .as_ref()
                .and(record.video_title.clone()),
            video_link: record.video_link.clone(),
            video_embed,
            pdf_href: pdf_href(prefix, record),
        }
    }
}
