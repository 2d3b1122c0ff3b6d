//! Filtering and querying of catalog records
//!
//! This module provides the predicates used by the listing views (subject,
//! grade, category, free-text search, video association), a combinable
//! [`CatalogQuery`], and the video helpers that build deduplicated video
//! listings and join worksheets to separately loaded videos.
//!
//! ## Architecture
//!
//! - [`filters`] - Individual record predicates and [`CatalogQuery`]
//! - [`videos`] - Video listing, deduplication, worksheet association and
//!   YouTube id extraction

pub mod filters;
pub mod videos;

#[cfg(test)]
mod tests;

pub use filters::{CatalogQuery, SearchScope};
pub use videos::{VideoAssociation, associate_videos, embed_url, video_listing, youtube_video_id};

use crate::app::models::{Catalog, WorksheetRecord};
use tracing::debug;

impl Catalog {
    /// Records for one subject, excluding parent guides
    ///
    /// The subject comparison is case-insensitive.
    pub fn subject_listing(&self, subject: &str) -> Vec<&WorksheetRecord> {
        let listing: Vec<_> = self
            .records
            .iter()
            .filter(|record| filters::matches_subject(record, subject))
            .collect();
        debug!("Subject '{}' lists {} records", subject, listing.len());
        listing
    }

    /// Records filed under the parent guide sentinel subject
    pub fn parent_guides(&self) -> Vec<&WorksheetRecord> {
        self.records
            .iter()
            .filter(|record| filters::is_parent_guide(record))
            .collect()
    }

    /// Records matching every criterion of the query, in catalog order
    pub fn query(&self, query: &CatalogQuery) -> Vec<&WorksheetRecord> {
        query.apply(&self.records)
    }

    /// Deduplicated videos referenced by the catalog
    pub fn videos(&self) -> Vec<crate::app::models::Video> {
        video_listing(&self.records)
    }
}
