// SPDX-License-Identifier: PMPL-1.0-or-later
//! In-memory rolling window of recent audits.
//!
//! Callers that want a "last N audits" view keep one of these; there is no
//! persistence beyond the window and none is intended.

use crate::audit::AuditReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of audits retained
pub const DEFAULT_CAPACITY: usize = 10;

/// A summary of one completed audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Audited URL or "local"
    pub source_ref: String,
    /// Score of the audit
    pub score: u8,
    /// Number of violations found
    pub violation_count: usize,
    /// When the audit ran
    pub checked_at: DateTime<Utc>,
}

/// Rolling window of audit summaries, newest first
#[derive(Debug, Clone)]
pub struct AuditHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for AuditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditHistory {
    /// Create a history with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a history retaining at most `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a completed audit, evicting the oldest entry when full
    pub fn record(&mut self, report: &AuditReport) {
        self.entries.push_front(HistoryEntry {
            source_ref: report.result.source_ref.clone(),
            score: report.result.score,
            violation_count: report.result.violations.len(),
            checked_at: report.checked_at,
        });
        self.entries.truncate(self.capacity);
    }

    /// Entries from newest to oldest
    pub fn recent(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditSource, Auditor};
    use crate::catalog::RuleCatalog;

    fn report_for(html: &str) -> AuditReport {
        Auditor::new(RuleCatalog::default())
            .run(&AuditSource::Html {
                content: html.to_string(),
            })
            .unwrap()
    }

    #[test]
    fn test_record_keeps_newest_first() {
        let mut history = AuditHistory::new();
        history.record(&report_for("<html><body></body></html>"));
        history.record(&report_for("<html><body><h3>no h1</h3></body></html>"));

        let scores: Vec<u8> = history.recent().map(|e| e.score).collect();
        assert_eq!(scores, vec![97, 100]);
    }

    #[test]
    fn test_window_evicts_oldest() {
        let mut history = AuditHistory::with_capacity(3);
        for _ in 0..5 {
            history.record(&report_for("<html><body></body></html>"));
        }
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_clear() {
        let mut history = AuditHistory::new();
        history.record(&report_for("<html><body></body></html>"));
        history.clear();
        assert!(history.is_empty());
    }
}
