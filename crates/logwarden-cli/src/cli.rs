//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Logwarden - Enforce log retention on logrotate files and manage the cron trigger.
#[derive(Debug, Parser)]
#[command(name = "logwarden")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "table")]
    pub format: CliFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "LOGWARDEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON file holding the override list, replacing the configured one
    #[arg(long, global = true, value_name = "FILE")]
    pub overrides_json: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Report what would change without writing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rewrite every managed logrotate file
    Apply,

    /// Print the rewritten content of one file without writing it
    Rewrite(RewriteArgs),

    /// Reconcile the trigger script and update the crontab schedule
    Cron(CronArgs),

    /// Validate the configuration and show the schedule pattern
    Validate(ValidateArgs),
}

/// Arguments for the rewrite command.
#[derive(Debug, Parser)]
pub struct RewriteArgs {
    /// Logrotate file to rewrite
    pub file: PathBuf,

    /// Retention in days, instead of the configured value
    #[arg(short, long)]
    pub retention: Option<u32>,
}

/// Arguments for the cron command.
#[derive(Debug, Parser)]
pub struct CronArgs {
    /// Only reconcile the trigger script, leave the crontab alone
    #[arg(long)]
    pub skip_crontab: bool,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Print the effective configuration as TOML
    #[arg(long)]
    pub show: bool,
}
