//! Integration tests for histrig
//!
//! Exercise the extraction + rendering pipeline against the sample project and
//! drive the compiled binary end to end.

use hg_core::{Config, HistoryModel};
use hg_sql::{TriggerGenerator, TriggerStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const SAMPLE_PROJECT: &str = "tests/fixtures/sample_project";
const MIGRATION: &str = "20250623155513_add_history_triggers";

/// Path to the compiled histrig binary
fn histrig_bin() -> String {
    env!("CARGO_BIN_EXE_histrig").to_string()
}

/// Run a `histrig` CLI command and return (stdout, stderr, success).
fn run_histrig(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(histrig_bin())
        .args(args)
        .env_remove("HISTRIG_CONFIG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute histrig with args {:?}: {}", args, e));
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

fn expected_sql() -> String {
    fs::read_to_string(Path::new(SAMPLE_PROJECT).join("expected/history_triggers.sql")).unwrap()
}

/// Copy the sample project into a scratch directory so tests can write to it
fn scratch_project() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("project");
    copy_dir(Path::new(SAMPLE_PROJECT), &root);
    (dir, root)
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

fn migration_file(root: &Path) -> PathBuf {
    root.join("server/src/model/migrations")
        .join(MIGRATION)
        .join("migration.sql")
}

#[test]
fn test_pipeline_matches_expected_sql() {
    let root = Path::new(SAMPLE_PROJECT);
    let config = Config::load_from_dir(root).unwrap();
    let generator = TriggerGenerator::new(TriggerStyle::from(&config.trigger)).unwrap();

    let mut sql = String::new();
    for folder in &config.models {
        let model = HistoryModel::load(
            &config.model_root_absolute(root),
            folder,
            &config.excluded_columns,
        )
        .unwrap();
        assert_eq!(
            format!("{}_history", model.table.base),
            model.table.history.as_str()
        );
        sql.push_str(&generator.generate_model(&model).unwrap());
        sql.push_str("\n\n");
    }

    assert_eq!(sql, expected_sql());
}

#[test]
fn test_user_model_columns() {
    let root = Path::new(SAMPLE_PROJECT);
    let config = Config::load_from_dir(root).unwrap();
    let model = HistoryModel::load(
        &config.model_root_absolute(root),
        &config.models[2],
        &config.excluded_columns,
    )
    .unwrap();

    assert_eq!(model.table.base, "users");
    let columns: Vec<&str> = model.columns.iter().map(|c| c.as_str()).collect();
    assert_eq!(
        columns,
        vec![
            "id",
            "cognito_subject",
            "username",
            "email",
            "full_name",
            "created_at"
        ]
    );
}

#[test]
fn test_cli_generate_dry_run() {
    let (stdout, stderr, success) =
        run_histrig(&["generate", MIGRATION, "--dry-run", "-p", SAMPLE_PROJECT]);
    assert!(success, "histrig failed: {stderr}");
    assert_eq!(stdout, expected_sql());
}

#[test]
fn test_cli_generate_dry_run_subset() {
    let (stdout, stderr, success) = run_histrig(&[
        "generate",
        MIGRATION,
        "--dry-run",
        "-p",
        SAMPLE_PROJECT,
        "-m",
        "role",
    ]);
    assert!(success, "histrig failed: {stderr}");
    assert!(stdout.starts_with("CREATE OR REPLACE FUNCTION demos_app.log_changes_role()\n"));
    assert_eq!(stdout.matches("CREATE OR REPLACE TRIGGER").count(), 1);
}

#[test]
fn test_cli_generate_appends_to_migration() {
    let (_dir, root) = scratch_project();
    let before = fs::read_to_string(migration_file(&root)).unwrap();

    let (_, stderr, success) =
        run_histrig(&["generate", MIGRATION, "-p", root.to_str().unwrap()]);
    assert!(success, "histrig failed: {stderr}");

    let after = fs::read_to_string(migration_file(&root)).unwrap();
    assert_eq!(after, format!("{before}{}", expected_sql()));
}

#[test]
fn test_cli_generate_overwrite_is_idempotent() {
    let (_dir, root) = scratch_project();
    let project = root.to_str().unwrap();

    let (_, stderr, success) = run_histrig(&["generate", MIGRATION, "--overwrite", "-p", project]);
    assert!(success, "histrig failed: {stderr}");
    let first = fs::read(migration_file(&root)).unwrap();

    let (_, stderr, success) = run_histrig(&["generate", MIGRATION, "--overwrite", "-p", project]);
    assert!(success, "histrig failed: {stderr}");
    let second = fs::read(migration_file(&root)).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, expected_sql().into_bytes());
}

#[test]
fn test_cli_generate_non_history_model_fails_without_writing() {
    let (_dir, root) = scratch_project();
    fs::write(
        root.join("server/src/model/role/roleHistory.prisma"),
        "model Role {\n  id String\n\n  @@map(\"role\")\n}\n",
    )
    .unwrap();
    let before = fs::read_to_string(migration_file(&root)).unwrap();

    let (_, stderr, success) =
        run_histrig(&["generate", MIGRATION, "-p", root.to_str().unwrap()]);
    assert!(!success);
    assert!(stderr.contains("[H002]"), "unexpected stderr: {stderr}");
    assert_eq!(fs::read_to_string(migration_file(&root)).unwrap(), before);
}

#[test]
fn test_cli_generate_unknown_model() {
    let (_, stderr, success) = run_histrig(&[
        "generate",
        MIGRATION,
        "--dry-run",
        "-p",
        SAMPLE_PROJECT,
        "-m",
        "bundle",
    ]);
    assert!(!success);
    assert!(stderr.contains("Unknown model 'bundle'"), "unexpected stderr: {stderr}");
}

#[test]
fn test_cli_ls_json() {
    let (stdout, stderr, success) = run_histrig(&["ls", "-o", "json", "-p", SAMPLE_PROJECT]);
    assert!(success, "histrig failed: {stderr}");

    let models: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let models = models.as_array().unwrap();
    assert_eq!(models.len(), 3);
    assert_eq!(models[0]["folder"], "_userRole");
    assert_eq!(models[0]["history_table"], "user_role_history");
    assert_eq!(models[2]["base_table"], "users");
    assert!(models[1].get("error").is_none());
}

#[test]
fn test_cli_ls_table() {
    let (stdout, stderr, success) = run_histrig(&["ls", "-p", SAMPLE_PROJECT]);
    assert!(success, "histrig failed: {stderr}");
    assert!(stdout.contains("FOLDER"));
    assert!(stdout.contains("user_role_history"));
    assert!(stdout.contains("3 models, 0 with errors"));
}

#[test]
fn test_cli_check_sample_project() {
    let (stdout, stderr, success) = run_histrig(&["check", "-p", SAMPLE_PROJECT]);
    assert!(success, "histrig failed: {stderr}");
    assert!(stdout.contains("All 3 models passed"));
}

#[test]
fn test_cli_explicit_missing_config() {
    let (_, stderr, success) = run_histrig(&[
        "check",
        "-p",
        SAMPLE_PROJECT,
        "-c",
        "tests/fixtures/does_not_exist.yml",
    ]);
    assert!(!success);
    assert!(stderr.contains("[E001]"), "unexpected stderr: {stderr}");
}
