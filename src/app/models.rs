//! Data models for the worksheet catalog
//!
//! This module contains the core data structures for representing catalog rows:
//! raw column/value records, the typed worksheet view built on top of them,
//! grade sets for both grade schemas, and standalone video entries.

use crate::constants::{self, categories, columns};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// One catalog row as an ordered mapping from column name to value
///
/// Header order is preserved so that a record serialised into a detail link
/// lists its fields in the same order as the CSV.
pub type RawRecord = IndexMap<String, String>;

// =============================================================================
// Subject
// =============================================================================

/// Subject classification of a worksheet
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    Math,
    Reading,
    /// Generic guides kept out of the subject listings
    ParentGuide,
    Other(String),
}

impl Subject {
    /// Classify a raw subject value (case-insensitive)
    pub fn classify(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("math") {
            Subject::Math
        } else if trimmed.eq_ignore_ascii_case("reading") {
            Subject::Reading
        } else if trimmed.eq_ignore_ascii_case(constants::PARENT_GUIDE_SUBJECT) {
            Subject::ParentGuide
        } else {
            Subject::Other(trimmed.to_string())
        }
    }

    /// Whether this subject is the parent guide sentinel
    pub fn is_parent_guide(&self) -> bool {
        matches!(self, Subject::ParentGuide)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Math => write!(f, "Math"),
            Subject::Reading => write!(f, "Reading"),
            Subject::ParentGuide => write!(f, "{}", constants::PARENT_GUIDE_SUBJECT),
            Subject::Other(name) => write!(f, "{}", name),
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// Category of a worksheet, used for filter grouping and badges
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Activity,
    ParentGuide,
    /// Matches both "Games" and the legacy misspelling "Ganes"
    Games,
    Other(String),
    Unspecified,
}

impl Category {
    /// Classify a raw category value
    ///
    /// Matching is exact apart from the tolerated misspelling of "Games".
    pub fn classify(value: &str) -> Self {
        match value.trim() {
            "" => Category::Unspecified,
            categories::ACTIVITY => Category::Activity,
            categories::PARENT_GUIDE => Category::ParentGuide,
            categories::GAMES | categories::GAMES_MISSPELLED => Category::Games,
            other => Category::Other(other.to_string()),
        }
    }
}

// =============================================================================
// Grades
// =============================================================================

/// Grade levels served by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    Kindergarten,
    First,
    Second,
}

impl Grade {
    /// All grades in ascending order
    pub const ALL: [Grade; 3] = [Grade::Kindergarten, Grade::First, Grade::Second];

    /// Parse a single grade token ("K", "1", "Grade 2", "first", ...)
    pub fn parse_token(token: &str) -> Option<Self> {
        let cleaned = token.replace(['"', '\''], "");
        let lower = cleaned.trim().to_lowercase();
        let lower = lower.strip_prefix("grade").map(str::trim).unwrap_or(&lower);
        match lower {
            "k" | "kinder" | "kindergarten" => Some(Grade::Kindergarten),
            "1" | "first" | "1st" => Some(Grade::First),
            "2" | "second" | "2nd" => Some(Grade::Second),
            _ => None,
        }
    }

    /// Column holding this grade's flag in the flag schema
    pub fn flag_column(self) -> &'static str {
        match self {
            Grade::Kindergarten => columns::IS_KINDER,
            Grade::First => columns::IS_FIRST,
            Grade::Second => columns::IS_SECOND,
        }
    }

    /// Badge label ("K", "Grade 1", "Grade 2")
    pub fn label(self) -> &'static str {
        match self {
            Grade::Kindergarten => "K",
            Grade::First => "Grade 1",
            Grade::Second => "Grade 2",
        }
    }
}

impl FromStr for Grade {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Grade::parse_token(s).ok_or_else(|| {
            crate::Error::configuration(format!(
                "Unknown grade '{}': expected K, 1 or 2",
                s.trim()
            ))
        })
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Grade column layout used by a catalog file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeSchema {
    /// Three boolean columns: isKinder, isFirst, isSecond
    Flags,
    /// A single free-text "Grade Level" column
    LegacyText,
    /// No grade columns at all
    #[default]
    Unspecified,
}

impl GradeSchema {
    /// Detect the grade schema from a header row
    ///
    /// Flag columns take precedence when both layouts are present.
    pub fn detect<S: AsRef<str>>(headers: &[S]) -> Self {
        let has = |name: &str| headers.iter().any(|h| h.as_ref() == name);
        let has_flags = columns::GRADE_FLAGS.iter().any(|c| has(c));
        let has_text = has(columns::GRADE_LEVEL);

        if has_flags && has_text {
            debug!("Catalog has both grade layouts, using flag columns");
        }

        if has_flags {
            GradeSchema::Flags
        } else if has_text {
            GradeSchema::LegacyText
        } else {
            GradeSchema::Unspecified
        }
    }
}

/// Set of grades a worksheet is suitable for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeSet {
    grades: BTreeSet<Grade>,
}

impl GradeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the three flag values; only the literal "TRUE" sets a flag
    pub fn from_flags(kinder: &str, first: &str, second: &str) -> Self {
        let mut set = Self::new();
        for (grade, value) in Grade::ALL.into_iter().zip([kinder, first, second]) {
            if value.trim() == constants::FLAG_TRUE {
                set.insert(grade);
            }
        }
        set
    }

    /// Build from legacy grade text such as `"K, 1"`
    pub fn from_legacy_text(text: &str) -> Self {
        let mut set = Self::new();
        let cleaned = text.replace(['"', '\''], "");
        for token in cleaned.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match Grade::parse_token(token) {
                Some(grade) => set.insert(grade),
                None => debug!("Ignoring unrecognised grade token '{}'", token),
            }
        }
        set
    }

    pub fn insert(&mut self, grade: Grade) {
        self.grades.insert(grade);
    }

    pub fn contains(&self, grade: Grade) -> bool {
        self.grades.contains(&grade)
    }

    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Grade> + '_ {
        self.grades.iter().copied()
    }

    /// Badge labels in ascending grade order
    pub fn labels(&self) -> Vec<&'static str> {
        self.iter().map(Grade::label).collect()
    }

    /// Flag value ("TRUE"/"FALSE") for the given grade
    pub fn flag_value(&self, grade: Grade) -> &'static str {
        if self.contains(grade) {
            constants::FLAG_TRUE
        } else {
            constants::FLAG_FALSE
        }
    }
}

// =============================================================================
// Worksheet Record
// =============================================================================

/// Typed view of one catalog row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorksheetRecord {
    /// Filename as listed, trimmed; may lack the `.pdf` extension
    pub filename: String,

    /// Raw subject value, trimmed
    pub subject: String,

    /// Raw category value, trimmed
    pub category: String,

    /// Grades derived from whichever grade columns the row carries
    pub grades: GradeSet,

    /// Video title, absent when empty or "n/a"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_title: Option<String>,

    /// Video link, absent when empty or "n/a"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_link: Option<String>,

    /// Free-text description shown in the detail view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// All columns of the original row
    #[serde(skip)]
    pub fields: RawRecord,
}

impl WorksheetRecord {
    /// Build a typed record from a raw row
    ///
    /// Flag columns are used for grades when any of them is present in the
    /// row, otherwise the legacy "Grade Level" text is parsed.
    pub fn from_raw(fields: RawRecord) -> Self {
        let get = |name: &str| fields.get(name).map(|v| v.trim()).unwrap_or("");

        let has_flag_columns = columns::GRADE_FLAGS.iter().any(|c| fields.contains_key(*c));
        let grades = if has_flag_columns {
            GradeSet::from_flags(
                get(columns::IS_KINDER),
                get(columns::IS_FIRST),
                get(columns::IS_SECOND),
            )
        } else {
            GradeSet::from_legacy_text(get(columns::GRADE_LEVEL))
        };

        Self {
            filename: get(columns::FILENAME).to_string(),
            subject: get(columns::SUBJECT).to_string(),
            category: get(columns::CATEGORY).to_string(),
            grades,
            video_title: present_value(get(columns::VIDEO_TITLE)),
            video_link: present_value(get(columns::VIDEO_LINK)),
            description: optional_value(get(columns::DESCRIPTION)),
            fields,
        }
    }

    /// Title shown on cards and the detail view
    pub fn display_title(&self) -> &str {
        if self.filename.is_empty() {
            constants::UNTITLED
        } else {
            &self.filename
        }
    }

    pub fn subject_kind(&self) -> Subject {
        Subject::classify(&self.subject)
    }

    pub fn category_kind(&self) -> Category {
        Category::classify(&self.category)
    }

    /// Badge label for the category ("Game" for games, "Resource" when empty)
    pub fn category_badge(&self) -> &str {
        match self.category_kind() {
            Category::Games => categories::GAME_BADGE,
            Category::Unspecified => categories::FALLBACK_BADGE,
            _ => &self.category,
        }
    }

    /// Whether the record links to a video
    pub fn has_video(&self) -> bool {
        self.video_link.is_some()
    }

    /// Raw value of any column, empty when the column is absent
    pub fn field(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }
}

/// Returns `None` for empty values and the "n/a" sentinel
pub fn present_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == constants::NOT_APPLICABLE {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn optional_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// =============================================================================
// Videos
// =============================================================================

/// A titled instructional video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub title: String,
    pub link: String,
}

impl Video {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A parsed catalog: header, detected grade schema and typed records
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub headers: Vec<String>,
    pub schema: GradeSchema,
    pub records: Vec<WorksheetRecord>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[WorksheetRecord] {
        &self.records
    }
}
