//! Check command implementation

use anyhow::{bail, Context, Result};
use hg_sql::{TriggerGenerator, TriggerStyle};

use crate::cli::{CheckArgs, GlobalArgs};
use crate::commands::common::{load_project, Project};

/// Outcome of checking a single model
#[derive(Debug)]
pub(crate) struct CheckResult {
    pub(crate) folder: String,
    pub(crate) outcome: std::result::Result<usize, String>,
}

/// Execute the check command
pub fn execute(args: &CheckArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let results = check_models(&project, &args.models)?;

    println!("Checking {} history models\n", results.len());
    for result in &results {
        match &result.outcome {
            Ok(columns) => println!("  {} ✓ ({} columns)", result.folder, columns),
            Err(e) => println!("  {} ✗ {}", result.folder, e),
        }
    }

    let failed = results.iter().filter(|r| r.outcome.is_err()).count();
    println!();
    if failed > 0 {
        bail!("{} of {} models failed checks", failed, results.len());
    }
    println!("All {} models passed", results.len());
    Ok(())
}

/// Extract and render every selected model, collecting failures instead of
/// stopping at the first one.
pub(crate) fn check_models(project: &Project, requested: &[String]) -> Result<Vec<CheckResult>> {
    let folders = project
        .config
        .select_models(requested)
        .context("Invalid --models selection")?;
    let generator = TriggerGenerator::new(TriggerStyle::from(&project.config.trigger))
        .context("Failed to load trigger template")?;

    Ok(folders
        .iter()
        .map(|folder| {
            let outcome = project
                .load_model(folder)
                .map_err(|e| e.to_string())
                .and_then(|model| {
                    generator
                        .generate_model(&model)
                        .map(|_| model.columns.len())
                        .map_err(|e| e.to_string())
                });
            log::debug!("Checked '{folder}': {outcome:?}");
            CheckResult {
                folder: folder.to_string(),
                outcome,
            }
        })
        .collect())
}

#[cfg(test)]
#[path = "check_test.rs"]
mod tests;
