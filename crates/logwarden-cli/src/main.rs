//! Logwarden CLI - Retention enforcement for logrotate and the cron trigger.

use clap::Parser;
use logwarden_cli::commands;
use logwarden_cli::{Cli, Command, ConfigSource, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Log to stderr; stdout carries command output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> logwarden_cli::Result<()> {
    let config = ConfigSource::from(&cli).load()?;
    let formatter = Formatter::new(cli.format, !cli.no_color);

    match cli.command {
        Command::Apply => commands::execute_apply(config, &formatter),
        Command::Rewrite(args) => commands::execute_rewrite(args, config),
        Command::Cron(args) => commands::execute_cron(args, &config, &formatter),
        Command::Validate(args) => commands::execute_validate(args, &config, &formatter),
    }
}
