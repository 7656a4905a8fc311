//! Crate error type.
//!
//! Soft-rule violations and unfilled slots are never errors; this type
//! only covers failures that stop a run before any trial starts (bad
//! input, bad configuration) or that happen at the I/O boundary.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while loading, configuring, running, or exporting.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel parse error: {0}")]
    Excel(String),

    #[error("unsupported input format: {0} (expected .xlsx, .xls or a directory of .csv files)")]
    UnsupportedFormat(String),

    #[error("missing sheet or file '{0}'")]
    MissingTable(String),

    #[error("table '{table}' is missing column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("invalid value in table '{table}', row {row}, column '{column}': '{value}' ({message})")]
    InvalidValue {
        table: String,
        row: usize,
        column: String,
        value: String,
        message: String,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("input validation failed: {}", format_validation(.0))]
    Validation(Vec<ValidationError>),

    #[error("worker pool could not be built: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<ValidationError>> for RosterError {
    fn from(errors: Vec<ValidationError>) -> Self {
        RosterError::Validation(errors)
    }
}

/// Result alias for fallible crate operations.
pub type RosterResult<T> = Result<T, RosterError>;
