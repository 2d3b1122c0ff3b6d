//! Presentation of catalog records
//!
//! The website has no per-record storage: a detail page receives the whole
//! record through its query string. This module builds those links, recovers
//! records from them, and assembles the card and detail views shown by the CLI.

pub mod detail;
pub mod views;


pub use detail::{detail_href, detail_index, record_from_detail_url};
pub use views::{DetailView, WorksheetCard, pdf_href, subject_href};
