//! History trigger generation
//!
//! The SQL shape is fixed by `templates/history_trigger.sql`. Rendering only
//! substitutes names, so identical inputs always give byte-identical output.

use crate::error::{SqlError, SqlResult};
use hg_core::{ColumnName, HistoryModel, HistoryTable, TriggerConfig};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;

const TEMPLATE_NAME: &str = "history_trigger.sql";
const TEMPLATE_SOURCE: &str = include_str!("templates/history_trigger.sql");

/// Separator between entries of a column or value list; entries sit 12 spaces
/// deep inside the `INSERT INTO (...)` and `VALUES (...)` blocks.
const LIST_SEPARATOR: &str = ",\n            ";

/// How names in the generated SQL are qualified and how the trigger is declared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerStyle {
    /// Schema prefixed to the function, tables and enum type
    pub schema: Option<String>,
    /// Enum type the revision marker literal is cast to
    pub revision_enum: Option<String>,
    /// `CREATE OR REPLACE TRIGGER` when true, `CREATE TRIGGER` otherwise
    pub replace: bool,
}

impl TriggerStyle {
    /// Unqualified names, untyped markers, plain `CREATE TRIGGER`.
    pub fn bare() -> Self {
        Self {
            schema: None,
            revision_enum: None,
            replace: false,
        }
    }

    /// Prefix for schema-qualified names, e.g. `demos_app.` or empty.
    pub fn qualifier(&self) -> String {
        self.schema
            .as_deref()
            .map(|s| format!("{s}."))
            .unwrap_or_default()
    }

    /// Cast appended to each revision marker, e.g. `::demos_app.revision_type_enum`.
    pub fn marker_cast(&self) -> String {
        self.revision_enum
            .as_deref()
            .map(|e| format!("::{}{e}", self.qualifier()))
            .unwrap_or_default()
    }

    pub fn create_trigger_keyword(&self) -> &'static str {
        if self.replace {
            "CREATE OR REPLACE TRIGGER"
        } else {
            "CREATE TRIGGER"
        }
    }
}

impl Default for TriggerStyle {
    fn default() -> Self {
        Self::from(&TriggerConfig::default())
    }
}

impl From<&TriggerConfig> for TriggerStyle {
    fn from(config: &TriggerConfig) -> Self {
        Self {
            schema: config.schema.clone(),
            revision_enum: config.revision_enum.clone(),
            replace: config.replace,
        }
    }
}

/// Values substituted into the trigger template
#[derive(Serialize)]
struct TriggerContext<'a> {
    qualifier: String,
    marker_cast: String,
    create_trigger: &'static str,
    base: &'a str,
    history: &'a str,
    columns: String,
    new_values: String,
    old_values: String,
}

/// Renders history triggers in one fixed style
pub struct TriggerGenerator {
    env: Environment<'static>,
    style: TriggerStyle,
}

impl TriggerGenerator {
    /// Create a generator with the trigger template loaded
    pub fn new(style: TriggerStyle) -> SqlResult<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template(TEMPLATE_NAME, TEMPLATE_SOURCE)?;
        Ok(Self { env, style })
    }

    pub fn style(&self) -> &TriggerStyle {
        &self.style
    }

    /// Render the trigger function and trigger declaration for one table.
    ///
    /// The result carries no trailing newline.
    pub fn generate(&self, table: &HistoryTable, columns: &[ColumnName]) -> SqlResult<String> {
        if columns.is_empty() {
            return Err(SqlError::NoColumns {
                table: table.history.to_string(),
            });
        }

        let ctx = TriggerContext {
            qualifier: self.style.qualifier(),
            marker_cast: self.style.marker_cast(),
            create_trigger: self.style.create_trigger_keyword(),
            base: table.base.as_str(),
            history: table.history.as_str(),
            columns: join_prefixed(columns, ""),
            new_values: join_prefixed(columns, "NEW."),
            old_values: join_prefixed(columns, "OLD."),
        };

        let sql = self.env.get_template(TEMPLATE_NAME)?.render(ctx)?;
        log::debug!(
            "Rendered trigger for {} ({} columns)",
            table.history,
            columns.len()
        );
        Ok(sql)
    }

    /// Render the trigger for an extracted history model
    pub fn generate_model(&self, model: &HistoryModel) -> SqlResult<String> {
        self.generate(&model.table, &model.columns)
    }
}

/// Render a single trigger without keeping a generator around
pub fn generate_trigger(
    table: &HistoryTable,
    columns: &[ColumnName],
    style: &TriggerStyle,
) -> SqlResult<String> {
    TriggerGenerator::new(style.clone())?.generate(table, columns)
}

fn join_prefixed(columns: &[ColumnName], prefix: &str) -> String {
    columns
        .iter()
        .map(|c| format!("{prefix}{c}"))
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

#[cfg(test)]
#[path = "trigger_test.rs"]
mod tests;
