//! Error types for alarm filtering and lookup.

use vcheck_core::CheckError;

use crate::classification::FilterStage;

/// Errors surfaced by the alarm collection and filter pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AlarmError {
    /// Lookup by key found no triggered alarm.
    #[error("triggered alarm not found: {key}")]
    NotFound { key: String },

    /// Include and exclude lists were both set for the same stage.
    #[error("conflicting {dimension} filters: include and exclude lists are mutually exclusive")]
    ConflictingFilters { dimension: FilterStage },

    /// Filter file could not be parsed.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Snapshot could not be parsed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for alarm operations.
pub type Result<T> = std::result::Result<T, AlarmError>;

impl From<AlarmError> for CheckError {
    fn from(err: AlarmError) -> Self {
        match err {
            AlarmError::NotFound { key } => CheckError::NotFound(key),
            AlarmError::ConflictingFilters { .. } => CheckError::Config(err.to_string()),
            AlarmError::Parse(e) => CheckError::Serialize(e.to_string()),
            AlarmError::Json(e) => CheckError::Serialize(e.to_string()),
            AlarmError::Io(e) => CheckError::Io(e),
        }
    }
}
