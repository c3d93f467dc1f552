//! Validation errors for query and update terms.

use thiserror::Error;

/// Errors raised while validating a request fragment into a term.
///
/// These are caller-input errors: a term that fails validation aborts
/// compilation of the whole request before any execution is attempted.
#[derive(Debug, Error)]
pub enum TermError {
    #[error("no attributes selected for table {table}")]
    EmptyAttributes { table: String },

    #[error("no update assignments supplied for table {table}")]
    EmptyUpdates { table: String },

    #[error("invalid value for constraint on {column}: {value}")]
    InvalidConstraintValue { column: String, value: String },

    #[error("invalid value for update on {column}: {value}")]
    InvalidUpdateValue { column: String, value: String },
}

/// Result type for term validation.
pub type TermResult<T> = Result<T, TermError>;
