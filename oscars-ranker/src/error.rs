//! Error types for oscars-ranker
//!
//! Severity classes:
//! - `SourceUnavailable` is fatal for the run
//! - `RecordError` is per record: log, skip, keep going
//! - `CacheCorrupt` degrades to an empty cache
//! - `InputInvalid` is shown to the user, who is prompted again
//! - `Database` / `Io` are unrecoverable storage failures

use thiserror::Error;

/// Pipeline error type
#[derive(Debug, Error)]
pub enum PipelineError {
    /// AwardsSource unreachable or without a usable resource
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// A single record failed type coercion
    #[error("Record unparsable: {0}")]
    RecordUnparsable(#[from] RecordError),

    /// Cache file missing, unreadable or invalid JSON
    #[error("Cache corrupt: {0}")]
    CacheCorrupt(String),

    /// Interactive input outside the expected domain
    #[error("{0}")]
    InputInvalid(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// oscars-common error
    #[error("Common error: {0}")]
    Common(#[from] oscars_common::Error),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Why a raw award or movie record could not be turned into a row
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("record is not {0}")]
    WrongShape(&'static str),

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("invalid {field}: {value}")]
    InvalidField { field: &'static str, value: String },

    /// MovieSource answered with its not-found payload
    #[error("movie not found: {0}")]
    NotFound(String),
}

impl RecordError {
    pub fn invalid(field: &'static str, value: impl ToString) -> Self {
        RecordError::InvalidField {
            field,
            value: value.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RecordError::NotFound(_))
    }
}
