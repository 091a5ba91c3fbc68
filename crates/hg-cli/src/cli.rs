//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// histrig - generate PostgreSQL history triggers from Prisma history models
#[derive(Parser, Debug)]
#[command(name = "histrig")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Override config file path
    #[arg(short, long, global = true, env = "HISTRIG_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate history triggers into a migration folder
    Generate(GenerateArgs),

    /// List configured models and the tables they map to
    Ls(LsArgs),

    /// Validate every configured history model without writing anything
    Check(CheckArgs),
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Migration folder (under migrations_dir) that receives the SQL
    pub migration: String,

    /// Models to process, in order (default: all configured models)
    #[arg(short, long, num_args = 1.., value_delimiter = ',')]
    pub models: Vec<String>,

    /// Replace the output file instead of appending to it
    #[arg(long)]
    pub overwrite: bool,

    /// Print the SQL to stdout instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the ls command
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: LsOutput,
}

/// List output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Models to check (default: all configured models)
    #[arg(short, long, num_args = 1.., value_delimiter = ',')]
    pub models: Vec<String>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
