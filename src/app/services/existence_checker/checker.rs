//! Single and batch existence checks

use super::path::ResourcePath;
use super::probe::ResourceProbe;
use crate::app::models::WorksheetRecord;
use crate::constants::{DEFAULT_WORKSHEETS_PREFIX, default_probe_concurrency};
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of a batch check, both halves in input order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExistenceReport<'a> {
    pub present: Vec<&'a WorksheetRecord>,
    pub missing: Vec<&'a WorksheetRecord>,
}

impl ExistenceReport<'_> {
    pub fn total(&self) -> usize {
        self.present.len() + self.missing.len()
    }
}

/// Confirms that the PDFs behind catalog records exist
#[derive(Clone)]
pub struct ExistenceChecker {
    probe: Arc<dyn ResourceProbe>,
    prefix: String,
    concurrency: usize,
}

impl std::fmt::Debug for ExistenceChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExistenceChecker")
            .field("probe", &self.probe.describe())
            .field("prefix", &self.prefix)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

impl ExistenceChecker {
    /// Create a checker with the default prefix and concurrency
    pub fn new(probe: Arc<dyn ResourceProbe>) -> Self {
        Self {
            probe,
            prefix: DEFAULT_WORKSHEETS_PREFIX.to_string(),
            concurrency: default_probe_concurrency(),
        }
    }

    /// Set the first path segment of worksheet PDFs
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the number of probes in flight at once (at least one)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Path of the PDF behind a record
    pub fn resource_path(&self, record: &WorksheetRecord) -> Option<ResourcePath> {
        ResourcePath::for_worksheet(&self.prefix, &record.filename, &record.subject)
    }

    /// Whether the PDF behind a record exists
    ///
    /// Records without filename or subject do not exist. Probe errors are
    /// logged and reported as `false`.
    pub async fn exists(&self, record: &WorksheetRecord) -> bool {
        let Some(path) = self.resource_path(record) else {
            debug!(
                "Record '{}' has no filename or subject, treating as missing",
                record.display_title()
            );
            return false;
        };

        match self.probe.probe(&path).await {
            Ok(found) => {
                if !found {
                    debug!("Missing PDF: {}", path);
                }
                found
            }
            Err(e) => {
                warn!("Error checking PDF existence for {}: {}", record.filename, e);
                false
            }
        }
    }

    /// Probe each record concurrently, returning one flag per record in input order
    pub async fn check_each<'a, I>(&self, records: I, progress: Option<&ProgressBar>) -> Vec<bool>
    where
        I: IntoIterator<Item = &'a WorksheetRecord>,
    {
        // `buffered` yields results in input order
        stream::iter(records)
            .map(move |record| async move {
                let found = self.exists(record).await;
                if let Some(pb) = progress {
                    pb.inc(1);
                }
                found
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    /// Check every record concurrently, splitting them into present and missing
    pub async fn check_all<'a>(
        &self,
        records: &'a [WorksheetRecord],
        progress: Option<&ProgressBar>,
    ) -> ExistenceReport<'a> {
        info!(
            "Checking {} PDFs via {} ({} concurrent probes)",
            records.len(),
            self.probe.describe(),
            self.concurrency
        );

        let found = self.check_each(records, progress).await;

        let mut report = ExistenceReport::default();
        for (record, exists) in records.iter().zip(found) {
            if exists {
                report.present.push(record);
            } else {
                report.missing.push(record);
            }
        }

        info!(
            "Existence check complete: {} present, {} missing",
            report.present.len(),
            report.missing.len()
        );
        report
    }

    /// Keep only the records whose PDF exists, preserving order
    pub async fn retain_existing(&self, records: Vec<WorksheetRecord>) -> Vec<WorksheetRecord> {
        let keep = self.check_each(&records, None).await;

        records
            .into_iter()
            .zip(keep)
            .filter_map(|(record, found)| found.then_some(record))
            .collect()
    }
}
