//! Resource path construction

use crate::constants::PDF_EXTENSION;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Location of a worksheet PDF as unencoded path segments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// Path of the PDF behind a worksheet, `None` when filename or subject is blank
    ///
    /// The filename is trimmed and `.pdf` is appended unless already present;
    /// the subject is lowercased. No other normalisation is applied, so the
    /// result stays case- and whitespace-sensitive like the files on disk.
    pub fn for_worksheet(prefix: &str, filename: &str, subject: &str) -> Option<Self> {
        let filename = filename.trim();
        let subject = subject.trim();
        if filename.is_empty() || subject.is_empty() {
            return None;
        }

        Some(Self {
            segments: vec![
                prefix.trim_matches('/').to_string(),
                subject.to_lowercase(),
                with_pdf_extension(filename),
            ],
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Final segment, the PDF file name
    pub fn file_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Percent-encoded absolute URL path, e.g. `/worksheets/math/Counting%20Fun.pdf`
    ///
    /// Each segment is encoded as a URI component, so `/`, `\`, `&` and `+`
    /// inside a filename never change the shape of the path.
    pub fn url_path(&self) -> String {
        let mut encoded = String::new();
        for segment in &self.segments {
            encoded.push('/');
            encoded.push_str(&urlencoding::encode(segment));
        }
        encoded
    }

    /// Resolve against a site base URL, keeping any path prefix of the base
    pub fn resolve(&self, base: &Url) -> std::result::Result<Url, url::ParseError> {
        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(self.url_path().trim_start_matches('/'))
    }

    /// Location under a local public directory
    ///
    /// `None` when the subject or filename could step outside `root`.
    pub fn fs_path(&self, root: &Path) -> Option<PathBuf> {
        if !self.segments.iter().skip(1).all(|s| is_safe_segment(s)) {
            return None;
        }
        Some(
            self.segments
                .iter()
                .fold(root.to_path_buf(), |path, segment| path.join(segment)),
        )
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url_path())
    }
}

/// Append `.pdf` unless the name already ends with it (any case)
pub fn with_pdf_extension(filename: &str) -> String {
    if filename.to_lowercase().ends_with(PDF_EXTENSION) {
        filename.to_string()
    } else {
        format!("{}{}", filename, PDF_EXTENSION)
    }
}

/// Whether a catalog value can be used as a single directory or file name
pub fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty() && segment != "." && segment != ".." && !segment.contains(['/', '\\'])
}
