//! Configuration types and parsing for histrig.yml

use crate::error::{CoreError, CoreResult};
use crate::model_folder::ModelFolder;
use crate::schema::DEFAULT_EXCLUDED_COLUMNS;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// File names probed in the project directory, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["histrig.yml", "histrig.yaml"];

/// Model folders processed when no `models:` list is configured.
pub const DEFAULT_MODELS: &[&str] = &[
    "_rolePermission",
    "_userRole",
    "_userState",
    "_userStateDemonstration",
    "bundle",
    "bundleType",
    "demonstration",
    "demonstrationBundleType",
    "demonstrationStatus",
    "eventType",
    "permission",
    "role",
    "state",
    "user",
];

/// Main project configuration from histrig.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding one folder per model, relative to the project root
    #[serde(default = "default_model_root")]
    pub model_root: String,

    /// Directory holding migration folders, relative to the project root
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// File inside the migration folder that receives the generated SQL
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Whether to append to or replace the output file
    #[serde(default)]
    pub write_mode: WriteMode,

    /// Ordered model folders to generate triggers for
    #[serde(default = "default_models")]
    pub models: Vec<ModelFolder>,

    /// Bookkeeping columns that are never copied from the base row
    #[serde(default = "default_excluded_columns")]
    pub excluded_columns: Vec<String>,

    /// Shape of the generated SQL
    #[serde(default)]
    pub trigger: TriggerConfig,
}

/// How the generated trigger SQL is qualified and declared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerConfig {
    /// Schema prefixed to every function, table and type; `null` for bare names
    #[serde(default = "default_schema")]
    pub schema: Option<String>,

    /// Enum type the revision marker is cast to; `null` for untyped literals
    #[serde(default = "default_revision_enum")]
    pub revision_enum: Option<String>,

    /// Emit `CREATE OR REPLACE TRIGGER` instead of `CREATE TRIGGER`
    #[serde(default = "default_true")]
    pub replace: bool,
}

/// Output file handling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Append to an existing migration file (created if missing)
    #[default]
    Append,
    /// Replace the output file
    Overwrite,
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteMode::Append => write!(f, "append"),
            WriteMode::Overwrite => write!(f, "overwrite"),
        }
    }
}

fn default_model_root() -> String {
    "server/src/model".to_string()
}

fn default_migrations_dir() -> String {
    "server/src/model/migrations".to_string()
}

fn default_output_file() -> String {
    "migration.sql".to_string()
}

fn default_models() -> Vec<ModelFolder> {
    DEFAULT_MODELS.iter().map(|m| ModelFolder::new(*m)).collect()
}

fn default_excluded_columns() -> Vec<String> {
    DEFAULT_EXCLUDED_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn default_schema() -> Option<String> {
    Some("demos_app".to_string())
}

fn default_revision_enum() -> Option<String> {
    Some("revision_type_enum".to_string())
}

fn default_true() -> bool {
    true
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            revision_enum: default_revision_enum(),
            replace: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_root: default_model_root(),
            migrations_dir: default_migrations_dir(),
            output_file: default_output_file(),
            write_mode: WriteMode::default(),
            models: default_models(),
            excluded_columns: default_excluded_columns(),
            trigger: TriggerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                path: path.display().to_string(),
                source: e,
            })?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a project directory
    ///
    /// Looks for histrig.yml or histrig.yaml and falls back to the built-in
    /// defaults when neither exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        if !dir.is_dir() {
            return Err(CoreError::ProjectNotFound {
                path: dir.display().to_string(),
            });
        }

        match CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
        {
            Some(path) => Self::load(&path),
            None => {
                log::debug!(
                    "No histrig.yml in {}, using built-in defaults",
                    dir.display()
                );
                Ok(Self::default())
            }
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.models.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "At least one model folder must be listed in models".to_string(),
            });
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.models.iter().find(|m| !seen.insert(m.as_str())) {
            return Err(CoreError::ConfigInvalid {
                message: format!("Model '{dup}' is listed more than once"),
            });
        }

        if self.output_file.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "output_file cannot be empty".to_string(),
            });
        }

        for (key, value) in [
            ("trigger.schema", &self.trigger.schema),
            ("trigger.revision_enum", &self.trigger.revision_enum),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(CoreError::ConfigInvalid {
                    message: format!("{key} cannot be empty; use null to omit it"),
                });
            }
        }

        Ok(())
    }

    /// Get absolute path to the model root
    pub fn model_root_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.model_root)
    }

    /// Get absolute path to a migration folder
    pub fn migration_dir(&self, root: &Path, migration: &str) -> PathBuf {
        root.join(&self.migrations_dir).join(migration)
    }

    /// Get absolute path to the file a migration's SQL is written to
    pub fn migration_output_path(&self, root: &Path, migration: &str) -> PathBuf {
        self.migration_dir(root, migration).join(&self.output_file)
    }

    /// Resolve the models to process.
    ///
    /// An empty request selects every configured model in configured order.
    /// Otherwise the requested names are returned in the order given, and each
    /// must be one of the configured models.
    pub fn select_models(&self, requested: &[String]) -> CoreResult<Vec<ModelFolder>> {
        if requested.is_empty() {
            return Ok(self.models.clone());
        }

        requested
            .iter()
            .map(|name| {
                self.models
                    .iter()
                    .find(|m| m.as_str() == name)
                    .cloned()
                    .ok_or_else(|| CoreError::UnknownModel {
                        name: name.clone(),
                        available: self
                            .models
                            .iter()
                            .map(ModelFolder::as_str)
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
