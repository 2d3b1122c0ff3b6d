//! Record predicates
//!
//! Each predicate looks at a single record. [`CatalogQuery`] combines them;
//! a record must satisfy every criterion that is set.

use crate::app::models::{Category, Grade, WorksheetRecord};
use serde::Serialize;

/// Fields consulted by free-text search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SearchScope {
    Filename,
    Category,
    #[default]
    Both,
}

/// Case-insensitive subject match; parent guides never match a subject listing
pub fn matches_subject(record: &WorksheetRecord, subject: &str) -> bool {
    if is_parent_guide(record) {
        return false;
    }
    !record.subject.is_empty() && record.subject.to_lowercase() == subject.trim().to_lowercase()
}

/// Whether the record belongs to the dedicated parent guide listing
pub fn is_parent_guide(record: &WorksheetRecord) -> bool {
    record.subject_kind().is_parent_guide()
}

/// Whether the record is marked for the given grade
pub fn matches_grade(record: &WorksheetRecord, grade: Grade) -> bool {
    record.grades.contains(grade)
}

/// Category match with the "Ganes" misspelling treated as "Games"
pub fn matches_category(record: &WorksheetRecord, category: &Category) -> bool {
    record.category_kind() == *category
}

/// Case-insensitive substring search over filename and/or category
pub fn matches_search(record: &WorksheetRecord, term: &str, scope: SearchScope) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    let in_filename = || record.filename.to_lowercase().contains(&term);
    let in_category = || record.category.to_lowercase().contains(&term);

    match scope {
        SearchScope::Filename => in_filename(),
        SearchScope::Category => in_category(),
        SearchScope::Both => in_filename() || in_category(),
    }
}

/// Whether the record links to a video (non-empty and not "n/a")
pub fn has_video(record: &WorksheetRecord) -> bool {
    record.has_video()
}

/// Combination of record filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogQuery {
    pub subject: Option<String>,
    pub grade: Option<Grade>,
    pub category: Option<Category>,
    pub search: Option<(String, SearchScope)>,
    pub with_video: bool,
    pub parent_guides: bool,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn grade(mut self, grade: Grade) -> Self {
        self.grade = Some(grade);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn search(mut self, term: impl Into<String>, scope: SearchScope) -> Self {
        self.search = Some((term.into(), scope));
        self
    }

    pub fn with_video(mut self) -> Self {
        self.with_video = true;
        self
    }

    /// Restrict to the parent guide listing instead of a subject listing
    pub fn parent_guides(mut self) -> Self {
        self.parent_guides = true;
        self
    }

    /// Check a single record against every criterion that is set
    pub fn matches(&self, record: &WorksheetRecord) -> bool {
        if self.parent_guides && !is_parent_guide(record) {
            return false;
        }
        if let Some(subject) = &self.subject {
            if !matches_subject(record, subject) {
                return false;
            }
        }
        if let Some(grade) = self.grade {
            if !matches_grade(record, grade) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !matches_category(record, category) {
                return false;
            }
        }
        if let Some((term, scope)) = &self.search {
            if !matches_search(record, term, *scope) {
                return false;
            }
        }
        if self.with_video && !has_video(record) {
            return false;
        }
        true
    }

    /// Filter records, preserving their order
    pub fn apply<'a>(&self, records: &'a [WorksheetRecord]) -> Vec<&'a WorksheetRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}
