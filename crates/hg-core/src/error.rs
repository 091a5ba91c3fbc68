//! Error types for hg-core

use thiserror::Error;

/// Core error type for histrig
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config {path}: {source}")]
    ConfigParseError {
        path: String,
        source: serde_yaml::Error,
    },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Project directory not found
    #[error("[E004] Project directory not found: {path}")]
    ProjectNotFound { path: String },

    /// E005: History schema file missing for a model folder
    #[error("[E005] Schema file not found for model '{model}': {path}")]
    SchemaFileNotFound { model: String, path: String },

    /// H001: No `@@map("...")` annotation in the model
    #[error("[H001] No @@map(\"...\") table annotation found in {path}")]
    MissingTableMap { path: String },

    /// H002: Mapped table is not a history table
    #[error("[H002] Table '{table}' in {path} is not a history table (expected a name ending in '_history')")]
    NotHistoryTable { table: String, path: String },

    /// H003: Requested model is not in the configured model list
    #[error("[H003] Unknown model '{name}'. Configured models: {available}")]
    UnknownModel { name: String, available: String },

    /// E016: IO error with file path context
    #[error("[E016] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
