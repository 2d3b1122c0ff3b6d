//! Tests for existence checking


use super::{ResourcePath, ResourceProbe};
use crate::app::models::{RawRecord, WorksheetRecord};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// How the stub answers for a given URL path
#[derive(Debug, Clone, Copy)]
pub enum Answer {
    Present,
    Absent,
    Fail,
}

/// Probe answering from a fixed table, with an optional per-path delay
#[derive(Default)]
pub struct StubProbe {
    answers: HashMap<String, (Answer, u64)>,
    pub calls: AtomicUsize,
}

impl StubProbe {
    pub fn with(mut self, url_path: &str, answer: Answer) -> Self {
        self.answers.insert(url_path.to_string(), (answer, 0));
        self
    }

    pub fn delayed(mut self, url_path: &str, answer: Answer, millis: u64) -> Self {
        self.answers.insert(url_path.to_string(), (answer, millis));
        self
    }
}

#[async_trait]
impl ResourceProbe for StubProbe {
    async fn probe(&self, path: &ResourcePath) -> Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (answer, delay) = self
            .answers
            .get(&path.url_path())
            .copied()
            .unwrap_or((Answer::Absent, 0));
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        match answer {
            Answer::Present => Ok(true),
            Answer::Absent => Ok(false),
            Answer::Fail => Err(Error::catalog(format!("probe failed for {}", path))),
        }
    }

    fn describe(&self) -> String {
        "stub".to_string()
    }
}

pub fn worksheet(filename: &str, subject: &str) -> WorksheetRecord {
    let mut fields = RawRecord::new();
    fields.insert("Filename".to_string(), filename.to_string());
    fields.insert("Subject".to_string(), subject.to_string());
    WorksheetRecord::from_raw(fields)
}
