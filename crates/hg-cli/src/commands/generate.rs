//! Generate command implementation

use anyhow::{bail, Context, Result};
use hg_core::WriteMode;
use hg_sql::{TriggerGenerator, TriggerStyle};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::cli::{GenerateArgs, GlobalArgs};
use crate::commands::common::{load_project, Project};

/// Generated SQL for a batch of models
#[derive(Debug)]
pub(crate) struct RenderedMigration {
    pub(crate) sql: String,
    pub(crate) trigger_count: usize,
}

/// Execute the generate command
pub fn execute(args: &GenerateArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;

    // Render everything before touching the output file; any failure writes nothing.
    let rendered = render_migration(&project, &args.models)?;

    if args.dry_run {
        print!("{}", rendered.sql);
        return Ok(());
    }

    let migration_dir = project.config.migration_dir(&project.root, &args.migration);
    if !migration_dir.is_dir() {
        bail!(
            "Migration folder not found: {}. Create the migration first.",
            migration_dir.display()
        );
    }

    let mode = if args.overwrite {
        WriteMode::Overwrite
    } else {
        project.config.write_mode
    };
    let output_path = migration_dir.join(&project.config.output_file);
    write_output(&output_path, &rendered.sql, mode)?;

    log::info!(
        "Wrote {} trigger{} to {} ({mode})",
        rendered.trigger_count,
        if rendered.trigger_count == 1 { "" } else { "s" },
        output_path.display()
    );

    Ok(())
}

/// Render the triggers for the requested models (all configured when empty)
///
/// Each block is followed by a blank line.
pub(crate) fn render_migration(project: &Project, requested: &[String]) -> Result<RenderedMigration> {
    let folders = project
        .config
        .select_models(requested)
        .context("Invalid --models selection")?;
    let models = project.load_models(&folders)?;

    let generator = TriggerGenerator::new(TriggerStyle::from(&project.config.trigger))
        .context("Failed to load trigger template")?;

    let mut sql = String::new();
    for model in &models {
        let block = generator
            .generate_model(model)
            .with_context(|| format!("Failed to generate trigger for '{}'", model.folder))?;
        log::debug!(
            "Generated trigger for {} -> {}",
            model.table.base,
            model.table.history
        );
        sql.push_str(&block);
        sql.push_str("\n\n");
    }

    Ok(RenderedMigration {
        sql,
        trigger_count: models.len(),
    })
}

fn write_output(path: &Path, sql: &str, mode: WriteMode) -> Result<()> {
    let mut file = match mode {
        WriteMode::Append => OpenOptions::new().create(true).append(true).open(path),
        WriteMode::Overwrite => OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path),
    }
    .with_context(|| format!("Failed to open {}", path.display()))?;

    file.write_all(sql.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
