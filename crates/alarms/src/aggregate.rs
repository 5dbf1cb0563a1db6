//! Severity aggregation over a classified collection.
//!
//! Every query takes `include_excluded`: when true, exclusion state is
//! ignored and every record is evaluated (diagnostics); when false, only
//! records not marked excluded are considered.

use serde::Serialize;
use vcheck_core::Severity;

use crate::alarm::TriggeredAlarm;
use crate::collection::TriggeredAlarms;

/// Number of eligible records at each severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub ok: usize,
    pub warning: usize,
    pub unknown: usize,
    pub critical: usize,
}

impl SeverityCounts {
    pub fn get(&self, level: Severity) -> usize {
        match level {
            Severity::Ok => self.ok,
            Severity::Warning => self.warning,
            Severity::Unknown => self.unknown,
            Severity::Critical => self.critical,
        }
    }

    pub fn total(&self) -> usize {
        self.ok + self.warning + self.unknown + self.critical
    }

    fn bump(&mut self, level: Severity) {
        match level {
            Severity::Ok => self.ok += 1,
            Severity::Warning => self.warning += 1,
            Severity::Unknown => self.unknown += 1,
            Severity::Critical => self.critical += 1,
        }
    }
}

impl TriggeredAlarms {
    fn eligible(&self, include_excluded: bool) -> impl Iterator<Item = &TriggeredAlarm> {
        self.iter().filter(move |a| include_excluded || !a.is_excluded())
    }

    /// Whether any eligible record is at `level`.
    pub fn has_severity(&self, level: Severity, include_excluded: bool) -> bool {
        self.eligible(include_excluded).any(|a| a.severity() == level)
    }

    /// Number of eligible records at `level`.
    pub fn count_severity(&self, level: Severity, include_excluded: bool) -> usize {
        self.eligible(include_excluded)
            .filter(|a| a.severity() == level)
            .count()
    }

    /// True when no eligible record is WARNING, UNKNOWN or CRITICAL.
    pub fn is_ok(&self, include_excluded: bool) -> bool {
        self.eligible(include_excluded)
            .all(|a| a.severity() == Severity::Ok)
    }

    /// Worst severity among eligible records; OK when there are none.
    pub fn overall_severity(&self, include_excluded: bool) -> Severity {
        self.eligible(include_excluded)
            .map(TriggeredAlarm::severity)
            .max()
            .unwrap_or(Severity::Ok)
    }

    /// All four counts in one pass.
    pub fn severity_counts(&self, include_excluded: bool) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for alarm in self.eligible(include_excluded) {
            counts.bump(alarm.severity());
        }
        counts
    }

    pub fn has_critical_state(&self, include_excluded: bool) -> bool {
        self.has_severity(Severity::Critical, include_excluded)
    }

    pub fn has_warning_state(&self, include_excluded: bool) -> bool {
        self.has_severity(Severity::Warning, include_excluded)
    }

    pub fn has_unknown_state(&self, include_excluded: bool) -> bool {
        self.has_severity(Severity::Unknown, include_excluded)
    }

    pub fn num_critical_state(&self, include_excluded: bool) -> usize {
        self.count_severity(Severity::Critical, include_excluded)
    }

    pub fn num_warning_state(&self, include_excluded: bool) -> usize {
        self.count_severity(Severity::Warning, include_excluded)
    }

    pub fn num_unknown_state(&self, include_excluded: bool) -> usize {
        self.count_severity(Severity::Unknown, include_excluded)
    }

    pub fn num_ok_state(&self, include_excluded: bool) -> usize {
        self.count_severity(Severity::Ok, include_excluded)
    }
}
