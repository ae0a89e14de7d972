//! Error types for the fieldorder library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fieldorder operations.
#[derive(Debug, Error)]
pub enum FieldOrderError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing CSV/TSV data.
    #[error("Parse error at row {row}, column {column}: {message}")]
    Parse {
        row: usize,
        column: usize,
        message: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no records to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A record does not expose the same fields as the first record.
    #[error("Schema mismatch at record {row}: expected fields [{}], found [{}]", expected.join(", "), found.join(", "))]
    SchemaMismatch {
        row: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A field name that is not part of the batch.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// An equivalence resolution choice other than 0 or 1.
    #[error("Invalid choice '{choice}' for ({first}, {second}): expected 0 or 1")]
    InvalidChoice {
        choice: String,
        first: String,
        second: String,
    },

    /// Error reading or writing the resolution prompt.
    #[error("Prompt error: {0}")]
    Prompt(#[source] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for fieldorder operations.
pub type Result<T> = std::result::Result<T, FieldOrderError>;
