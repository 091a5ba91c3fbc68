//! Extraction of history-table metadata from Prisma model files
//!
//! Only two annotations are understood: the model-level `@@map("name")` that
//! names the physical table, and the field-level `@map("name")` that renames a
//! column. Everything else in the file is skipped.

use crate::error::{CoreError, CoreResult};
use crate::model_folder::ModelFolder;
use crate::table_name::{ColumnName, HistoryTable};
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Bookkeeping columns of every history table; they are filled by the trigger
/// itself (or by defaults) rather than copied from the base row.
pub const DEFAULT_EXCLUDED_COLUMNS: &[&str] = &["revision_id", "revision_type", "modified_at"];

/// Prefix of a model-level attribute line.
const MODEL_ATTRIBUTE_PREFIX: &str = "  @@";

static TABLE_MAP_RE: OnceLock<Regex> = OnceLock::new();
static COLUMN_MAP_RE: OnceLock<Regex> = OnceLock::new();
static FIELD_RE: OnceLock<Regex> = OnceLock::new();

fn table_map_regex() -> &'static Regex {
    TABLE_MAP_RE.get_or_init(|| Regex::new(r#"@@map\("([^"]*)"\)"#).expect("valid regex literal"))
}

fn column_map_regex() -> &'static Regex {
    COLUMN_MAP_RE.get_or_init(|| Regex::new(r#"\s@map\("([^"]*)"\)"#).expect("valid regex literal"))
}

fn field_regex() -> &'static Regex {
    FIELD_RE.get_or_init(|| Regex::new(r"^  (\w+)").expect("valid regex literal"))
}

/// The ordered text lines of one model file.
#[derive(Debug, Clone)]
pub struct SchemaLines {
    path: PathBuf,
    lines: Vec<String>,
}

impl SchemaLines {
    /// Split file content into lines, remembering where it came from.
    pub fn from_content(path: impl Into<PathBuf>, content: &str) -> Self {
        Self {
            path: path.into(),
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    /// Read the history model of `folder` below `model_root`.
    pub fn read(model_root: &Path, folder: &ModelFolder) -> CoreResult<Self> {
        let path = folder.schema_path(model_root);
        if !path.is_file() {
            return Err(CoreError::SchemaFileNotFound {
                model: folder.to_string(),
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(&path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        log::debug!("Read {} lines from {}", content.lines().count(), path.display());
        Ok(Self::from_content(path, &content))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Recover the base/history table pair from the model's `@@map` annotation.
///
/// Only lines starting with two spaces and `@@` are considered, and the first
/// one carrying `@@map("...")` wins. Fails when there is no such annotation or
/// when the mapped name does not end in `_history`.
pub fn extract_history_table(schema: &SchemaLines) -> CoreResult<HistoryTable> {
    let mapped = schema
        .lines()
        .iter()
        .filter(|line| line.starts_with(MODEL_ATTRIBUTE_PREFIX))
        .find_map(|line| table_map_regex().captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| CoreError::MissingTableMap {
            path: schema.path().display().to_string(),
        })?;

    HistoryTable::from_history_name(mapped).ok_or_else(|| CoreError::NotHistoryTable {
        table: mapped.to_string(),
        path: schema.path().display().to_string(),
    })
}

/// Collect the column names of a model in declaration order.
///
/// Per line, an explicit `@map("...")` takes priority over the leading field
/// identifier. Lines matching neither contribute nothing, and names listed in
/// `excluded` are dropped.
pub fn extract_columns<S: AsRef<str>>(schema: &SchemaLines, excluded: &[S]) -> Vec<ColumnName> {
    schema
        .lines()
        .iter()
        .filter_map(|line| column_for_line(line))
        .filter(|col| !excluded.iter().any(|ex| ex.as_ref() == col.as_str()))
        .collect()
}

fn column_for_line(line: &str) -> Option<ColumnName> {
    let name = match column_map_regex().captures(line) {
        Some(caps) => caps.get(1)?.as_str(),
        None => field_regex().captures(line)?.get(1)?.as_str(),
    };
    ColumnName::try_new(name)
}

/// Everything needed to generate the trigger for one history model.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryModel {
    pub folder: ModelFolder,
    pub schema_path: PathBuf,
    pub table: HistoryTable,
    pub columns: Vec<ColumnName>,
}

impl HistoryModel {
    /// Read and extract the history model stored in `folder`.
    pub fn load<S: AsRef<str>>(
        model_root: &Path,
        folder: &ModelFolder,
        excluded: &[S],
    ) -> CoreResult<Self> {
        let schema = SchemaLines::read(model_root, folder)?;
        Self::from_schema(folder.clone(), &schema, excluded)
    }

    /// Extract a history model from already-read lines.
    pub fn from_schema<S: AsRef<str>>(
        folder: ModelFolder,
        schema: &SchemaLines,
        excluded: &[S],
    ) -> CoreResult<Self> {
        let table = extract_history_table(schema)?;
        let columns = extract_columns(schema, excluded);
        Ok(Self {
            folder,
            schema_path: schema.path().to_path_buf(),
            table,
            columns,
        })
    }
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
