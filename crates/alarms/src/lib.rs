//! Triggered-alarm filtering and severity aggregation.
//!
//! This crate provides:
//! - The triggered-alarm record model and its classification state machine
//! - A fixed-order include/exclude filter pipeline (acknowledgment, entity
//!   type, alarm name, alarm description, status, entity name, resource pool)
//! - Pluggable audit observers, including an in-memory audit log
//! - Severity aggregation and a serializable summary for reporting

pub mod aggregate;
pub mod alarm;
pub mod audit_log;
pub mod classification;
pub mod collection;
pub mod error;
pub mod observer;
pub mod options;
pub mod pipeline;
pub mod summary;

pub use aggregate::SeverityCounts;
pub use alarm::{AlarmRef, EntityRef, TriggeredAlarm};
pub use audit_log::AuditLog;
pub use classification::{Classification, FilterStage, StageOutcome};
pub use collection::TriggeredAlarms;
pub use error::{AlarmError, Result};
pub use observer::{FilterObserver, NoopObserver, TracingObserver, Transition};
pub use options::FilterOptions;
pub use pipeline::FilterPipeline;
pub use summary::AlarmSummary;
