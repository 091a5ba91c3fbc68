//! Strongly-typed table and column names.

use crate::newtype_string::define_newtype_string;
use serde::Serialize;

/// Suffix every history table name carries.
pub const HISTORY_SUFFIX: &str = "_history";

define_newtype_string! {
    /// Physical (database) name of a table, unqualified.
    pub struct TableName;
}

define_newtype_string! {
    /// Physical (database) name of a column.
    ///
    /// Prevents accidental mixing of column names with table or model names.
    pub struct ColumnName;
}

/// A base table paired with the history table that records its revisions.
///
/// Invariant: `history == base + "_history"` and `base` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryTable {
    pub base: TableName,
    pub history: TableName,
}

impl HistoryTable {
    /// Build the pair from a mapped history table name.
    ///
    /// Returns `None` unless the name ends in `_history` with a non-empty base
    /// in front of the suffix.
    pub fn from_history_name(name: &str) -> Option<Self> {
        let base = name.strip_suffix(HISTORY_SUFFIX)?;
        let base = TableName::try_new(base)?;
        Some(Self {
            base,
            history: TableName::new(name),
        })
    }
}
