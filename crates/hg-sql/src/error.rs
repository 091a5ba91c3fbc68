//! Error types for hg-sql

use thiserror::Error;

/// Trigger generation errors
#[derive(Error, Debug)]
pub enum SqlError {
    /// No columns left to copy (S001)
    #[error("[S001] History table '{table}' has no columns to copy after exclusions")]
    NoColumns { table: String },

    /// Template render error (S002)
    #[error("[S002] Trigger template render error: {0}")]
    RenderError(String),
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;

impl From<minijinja::Error> for SqlError {
    fn from(err: minijinja::Error) -> Self {
        SqlError::RenderError(err.to_string())
    }
}
