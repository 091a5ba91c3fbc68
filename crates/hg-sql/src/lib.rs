//! hg-sql - SQL generation layer for histrig
//!
//! Renders the PostgreSQL trigger function and trigger declaration that copy
//! every row change of a base table into its history table.

pub mod error;
pub mod trigger;

pub use error::{SqlError, SqlResult};
pub use trigger::{generate_trigger, TriggerGenerator, TriggerStyle};
