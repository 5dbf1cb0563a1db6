//! In-memory structured audit log of filter decisions.
//!
//! Stores per-alarm log entries capped at a configurable maximum (default 50)
//! with FIFO eviction. Implements [`FilterObserver`] so it can be handed to a
//! [`FilterPipeline`](crate::pipeline::FilterPipeline) and queried afterwards.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classification::{Classification, FilterStage, StageOutcome};
use crate::observer::{FilterObserver, Transition};

/// Severity level for audit log entries.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Decision that left the classification unchanged.
    Debug,
    /// Decision that changed the classification.
    Info,
}

impl LogLevel {
    /// Numeric severity for comparison (higher = more severe).
    pub fn as_severity(&self) -> u8 {
        match self {
            LogLevel::Debug => 0,
            LogLevel::Info => 1,
        }
    }
}

/// A single audit log entry for one stage decision.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub key: String,
    pub level: LogLevel,
    pub stage: FilterStage,
    pub outcome: StageOutcome,
    pub classification: Classification,
    pub message: String,
}

/// Query parameters for filtering audit log entries.
#[derive(Debug, Default)]
pub struct LogQueryParams {
    /// Minimum log level (inclusive).
    pub level: Option<LogLevel>,
    /// Filter to a specific stage.
    pub stage: Option<FilterStage>,
    /// Maximum number of entries to return.
    pub limit: Option<u32>,
    /// Only return entries recorded at or after this instant.
    pub since: Option<DateTime<Utc>>,
}

/// In-memory per-alarm audit log with FIFO eviction.
pub struct AuditLog {
    entries: Arc<RwLock<HashMap<String, VecDeque<LogEntry>>>>,
    max_entries_per_key: usize,
}

impl AuditLog {
    /// Create a new audit log with the default cap of 50 entries per alarm.
    pub fn new() -> Self {
        Self::with_max_entries(50)
    }

    /// Create a new audit log with a custom per-alarm entry cap.
    pub fn with_max_entries(max: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            max_entries_per_key: max,
        }
    }

    /// Append an entry for a stage decision.
    pub fn record(&self, transition: &Transition<'_>) {
        let level = if transition.changed() {
            LogLevel::Info
        } else {
            LogLevel::Debug
        };
        let entry = LogEntry {
            timestamp: Utc::now(),
            key: transition.key.to_string(),
            level,
            stage: transition.stage,
            outcome: transition.outcome,
            classification: transition.to,
            message: transition.describe(),
        };

        let mut guard = self.entries.write().expect("audit_log lock poisoned");
        let deque = guard
            .entry(transition.key.to_string())
            .or_insert_with(VecDeque::new);
        deque.push_back(entry);
        while deque.len() > self.max_entries_per_key {
            deque.pop_front();
        }
    }

    /// Query log entries for an alarm key, newest first.
    pub fn query(&self, key: &str, params: &LogQueryParams) -> Vec<LogEntry> {
        let guard = self.entries.read().expect("audit_log lock poisoned");
        let Some(deque) = guard.get(key) else {
            return Vec::new();
        };

        let min_severity = params
            .level
            .as_ref()
            .map(|l| l.as_severity())
            .unwrap_or(0);

        let limit = params.limit.unwrap_or(100) as usize;

        deque
            .iter()
            .rev()
            .filter(|e| e.level.as_severity() >= min_severity)
            .filter(|e| params.stage.map_or(true, |s| e.stage == s))
            .filter(|e| params.since.map_or(true, |s| e.timestamp >= s))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Alarm keys with at least one entry, sorted.
    pub fn keys(&self) -> Vec<String> {
        let guard = self.entries.read().expect("audit_log lock poisoned");
        let mut keys: Vec<String> = guard.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Clear all log entries for a specific alarm.
    pub fn clear(&self, key: &str) {
        let mut guard = self.entries.write().expect("audit_log lock poisoned");
        guard.remove(key);
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterObserver for AuditLog {
    fn on_transition(&self, transition: &Transition<'_>) {
        self.record(transition);
    }
}
