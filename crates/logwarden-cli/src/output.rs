//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use colored::*;
use logwarden_janitor::{FileOutcome, FileReport, ReconcileReport};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: CliFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: CliFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format per-file results of a sweep.
    pub fn format_reports(&self, reports: &[FileReport]) -> Result<String> {
        match self.format {
            CliFormat::Json => self.format_reports_json(reports),
            CliFormat::Table => Ok(self.format_reports_table(reports)),
        }
    }

    fn format_reports_json(&self, reports: &[FileReport]) -> Result<String> {
        let json: Vec<serde_json::Value> = reports
            .iter()
            .map(|r| {
                serde_json::json!({
                    "path": r.path.display().to_string(),
                    "stanzas": r.stanzas,
                    "outcome": r.outcome.label(),
                    "error": match &r.outcome {
                        FileOutcome::Failed(reason) => Some(reason.as_str()),
                        _ => None,
                    },
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json)?)
    }

    fn format_reports_table(&self, reports: &[FileReport]) -> String {
        if reports.is_empty() {
            return self.colorize("No logrotate files found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["File", "Stanzas", "Outcome"]);

        for report in reports {
            let outcome = match &report.outcome {
                FileOutcome::Failed(reason) => {
                    self.colorize(&format!("failed: {}", reason), "red")
                }
                FileOutcome::Rewritten | FileOutcome::WouldRewrite => {
                    self.colorize(report.outcome.label(), "green")
                }
                other => other.label().to_string(),
            };
            builder.push_record([
                report.path.display().to_string(),
                report.stanzas.to_string(),
                outcome,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format the outcome of a cron reconciliation.
    pub fn format_reconcile(&self, report: &ReconcileReport) -> Result<String> {
        if self.format == CliFormat::Json {
            let json = serde_json::json!({
                "removed": report
                    .removed
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>(),
                "installed": report.installed.as_ref().map(|p| p.display().to_string()),
            });
            return Ok(serde_json::to_string_pretty(&json)?);
        }

        let mut lines: Vec<String> = report
            .removed
            .iter()
            .map(|p| self.info(&format!("Removed {}", p.display())))
            .collect();
        match &report.installed {
            Some(path) => lines.push(self.success(&format!("Installed {}", path.display()))),
            None => lines.push(self.warning("Cron job disabled, no trigger installed")),
        }
        Ok(lines.join("\n"))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Whether structured output was requested.
    pub fn is_json(&self) -> bool {
        self.format == CliFormat::Json
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
