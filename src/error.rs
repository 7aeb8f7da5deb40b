use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for pipeline operations.
pub type EtlResult<T> = Result<T, EtlError>;

/// Error type returned by the pipeline and its collaborators.
///
/// Only structural failures surface here: a missing source table, an unparsable
/// required column, or a storage failure. Data-quality findings travel as
/// [`crate::validation::Issue`] lists instead, and rows excluded by a cleaner
/// are not errors at all.
#[derive(Debug, Error)]
pub enum EtlError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// SQLite storage error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// JSON serialization error while writing the run summary.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// One or more required source tables are absent.
    #[error("missing source tables: {}", paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "))]
    MissingSources { paths: Vec<PathBuf> },

    /// The input does not conform to the expected schema (missing required columns, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    Parse {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A required column contained no parsable values at all.
    #[error("column '{column}' in table '{table}' is entirely unparsable")]
    UnparsableColumn { table: String, column: String },

    /// Validation found issues and the run is configured to halt on them.
    #[error("validation failed with {} issue(s)", issues.len())]
    ValidationFailed { issues: Vec<String> },
}
