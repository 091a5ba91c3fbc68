//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use hg_core::{Config, HistoryModel, ModelFolder};
use std::path::PathBuf;

use crate::cli::GlobalArgs;

/// Project directory together with its resolved configuration
#[derive(Debug)]
pub(crate) struct Project {
    pub(crate) root: PathBuf,
    pub(crate) config: Config,
}

impl Project {
    pub(crate) fn model_root(&self) -> PathBuf {
        self.config.model_root_absolute(&self.root)
    }

    /// Read and extract one history model
    pub(crate) fn load_model(&self, folder: &ModelFolder) -> hg_core::CoreResult<HistoryModel> {
        HistoryModel::load(&self.model_root(), folder, &self.config.excluded_columns)
    }

    /// Read and extract every model in `folders`, stopping at the first failure
    pub(crate) fn load_models(&self, folders: &[ModelFolder]) -> Result<Vec<HistoryModel>> {
        folders
            .iter()
            .map(|folder| {
                log::debug!("Reading history model '{folder}'");
                self.load_model(folder)
                    .with_context(|| format!("Failed to read history model '{folder}'"))
            })
            .collect()
    }
}

/// Load the project from the global `--project-dir` / `--config` arguments
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = global.project_dir.clone();
    let config = match &global.config {
        Some(path) => Config::load(path),
        None => Config::load_from_dir(&root),
    }
    .context("Failed to load configuration")?;

    log::debug!(
        "Project root {}, {} configured models, write mode {}",
        root.display(),
        config.models.len(),
        config.write_mode
    );

    Ok(Project { root, config })
}
