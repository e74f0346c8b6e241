//! Error types for FAC scoring.

use thiserror::Error;

/// Errors raised while loading a peak table or computing scores.
#[derive(Error, Debug)]
pub enum FacError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Missing column '{0}' in peak table")]
    MissingColumn(String),

    #[error("Duplicate ion column '{0}'")]
    DuplicateIon(String),

    #[error("Empty column name at header position {index}")]
    EmptyColumnName { index: usize },

    #[error("Invalid value '{value}' at row {row}, column '{column}'")]
    InvalidValue {
        value: String,
        row: usize,
        column: String,
    },

    #[error("Missing group label at row {row}")]
    MissingGroupLabel { row: usize },

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Group '{group}' has no samples")]
    EmptyGroup { group: String },

    #[error("Group '{group}' contains every sample; no reference samples remain")]
    EmptyComplement { group: String },

    #[error("Reference group '{label}' not found")]
    MissingReferenceGroup { label: String },

    #[error("Reference group '{label}' has no defined max score")]
    UndefinedReferenceMax { label: String },

    #[error("Log means of group '{group}' have zero spread; z-scores are undefined")]
    DegenerateZScore { group: String },

    #[error("Table keys do not match: {0}")]
    KeyMismatch(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, FacError>;
