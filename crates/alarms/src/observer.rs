//! Audit hooks for classification changes.
//!
//! The pipeline reports every decision it makes about a record to a
//! [`FilterObserver`] supplied at construction time. Observers are purely
//! for audit; nothing they do feeds back into classification.

use tracing::debug;

use crate::classification::{Classification, FilterStage, StageOutcome};

/// A single stage decision about a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<'a> {
    pub key: &'a str,
    pub stage: FilterStage,
    pub outcome: StageOutcome,
    pub from: Classification,
    pub to: Classification,
}

impl Transition<'_> {
    /// Whether the record's classification actually changed.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }

    /// Short human-readable description of the decision.
    pub fn describe(&self) -> String {
        match (self.outcome, self.to) {
            (StageOutcome::ExcludeMatched, Classification::ExplicitlyExcluded(reason)) => {
                format!("explicitly excluded: {}", reason)
            }
            (StageOutcome::IncludeMatched, Classification::Included) => {
                format!("explicitly included by {} filter", self.stage)
            }
            (StageOutcome::IncludeMissed, Classification::ImplicitlyExcluded(reason)) => {
                format!("implicitly excluded: {}", reason)
            }
            (_, to) => format!("{} filter left record {}", self.stage, to),
        }
    }
}

/// Receiver for pipeline audit events.
pub trait FilterObserver {
    /// Called for every record a stage made a decision about.
    fn on_transition(&self, transition: &Transition<'_>);

    /// Called when a stage had nothing to do (empty collection or no lists).
    fn on_stage_skipped(&self, _stage: FilterStage) {}
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl FilterObserver for NoopObserver {
    fn on_transition(&self, _transition: &Transition<'_>) {}
}

/// Observer that emits `tracing` debug events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl FilterObserver for TracingObserver {
    fn on_transition(&self, transition: &Transition<'_>) {
        debug!(
            key = %transition.key,
            stage = %transition.stage,
            outcome = ?transition.outcome,
            from = %transition.from,
            to = %transition.to,
            "{}",
            transition.describe()
        );
    }

    fn on_stage_skipped(&self, stage: FilterStage) {
        debug!(stage = %stage, "filter stage skipped");
    }
}
