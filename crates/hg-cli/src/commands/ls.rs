//! List command implementation

use anyhow::Result;
use serde::Serialize;

use crate::cli::{GlobalArgs, LsArgs, LsOutput};
use crate::commands::common::load_project;

/// Model information for display
#[derive(Debug, Serialize)]
pub(crate) struct ModelInfo {
    pub(crate) folder: String,
    pub(crate) schema_file: String,
    pub(crate) base_table: Option<String>,
    pub(crate) history_table: Option<String>,
    pub(crate) columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

/// Execute the ls command
pub fn execute(args: &LsArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let model_root = project.model_root();

    let models: Vec<ModelInfo> = project
        .config
        .models
        .iter()
        .map(|folder| {
            let schema_file = folder.schema_path(&model_root).display().to_string();
            match project.load_model(folder) {
                Ok(model) => ModelInfo {
                    folder: folder.to_string(),
                    schema_file,
                    base_table: Some(model.table.base.to_string()),
                    history_table: Some(model.table.history.to_string()),
                    columns: model.columns.iter().map(|c| c.to_string()).collect(),
                    error: None,
                },
                Err(e) => ModelInfo {
                    folder: folder.to_string(),
                    schema_file,
                    base_table: None,
                    history_table: None,
                    columns: Vec::new(),
                    error: Some(e.to_string()),
                },
            }
        })
        .collect();

    match args.output {
        LsOutput::Table => print_table(&models),
        LsOutput::Json => println!("{}", serde_json::to_string_pretty(&models)?),
    }

    Ok(())
}

/// Print models in table format
fn print_table(models: &[ModelInfo]) {
    let folder_width = models
        .iter()
        .map(|m| m.folder.len())
        .max()
        .unwrap_or(6)
        .max(6);
    let table_width = models
        .iter()
        .map(|m| m.base_table.as_ref().map(|s| s.len()).unwrap_or(1))
        .max()
        .unwrap_or(5)
        .max(5);

    println!(
        "{:<folder_width$}  {:<table_width$}  {:<7}  HISTORY_TABLE",
        "FOLDER", "TABLE", "COLUMNS",
    );
    println!(
        "{:-<folder_width$}  {:-<table_width$}  {:-<7}  {}",
        "",
        "",
        "",
        "-".repeat(30),
    );

    for model in models {
        match &model.error {
            None => println!(
                "{:<folder_width$}  {:<table_width$}  {:<7}  {}",
                model.folder,
                model.base_table.as_deref().unwrap_or("-"),
                model.columns.len(),
                model.history_table.as_deref().unwrap_or("-"),
            ),
            Some(error) => println!(
                "{:<folder_width$}  {:<table_width$}  {:<7}  {}",
                model.folder, "-", "-", error,
            ),
        }
    }

    let broken = models.iter().filter(|m| m.error.is_some()).count();
    println!();
    println!("{} models, {} with errors", models.len(), broken);
}
