//! hg-core - Core library for histrig
//!
//! This crate provides configuration parsing, the error taxonomy, strongly-typed
//! names, and the extraction of history-table metadata from Prisma model files.

pub mod config;
pub mod error;
pub mod model_folder;
mod newtype_string;
pub mod schema;
pub mod table_name;

pub use config::{Config, TriggerConfig, WriteMode};
pub use error::{CoreError, CoreResult};
pub use model_folder::ModelFolder;
pub use schema::{extract_columns, extract_history_table, HistoryModel, SchemaLines};
pub use table_name::{ColumnName, HistoryTable, TableName};
