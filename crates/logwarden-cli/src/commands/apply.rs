//! Apply command implementation.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use logwarden_janitor::{Janitor, LogwardenConfig};

/// Execute the apply command.
///
/// Every file is attempted; the command fails afterwards if any could not
/// be rewritten.
pub fn execute_apply(config: LogwardenConfig, formatter: &Formatter) -> Result<()> {
    let dry_run = config.dry_run;
    let mut janitor = Janitor::new(config);
    let reports = janitor.sweep()?;

    println!("{}", formatter.format_reports(&reports)?);

    let metrics = janitor.metrics();
    tracing::debug!("\n{}", metrics.summary());

    if !formatter.is_json() {
        let verb = if dry_run { "Would rewrite" } else { "Rewrote" };
        println!(
            "{}",
            formatter.success(&format!(
                "{} {} of {} file(s), {} unchanged",
                verb,
                metrics.rewritten,
                metrics.total_files(),
                metrics.unchanged
            ))
        );
    }

    if metrics.failed > 0 {
        if !formatter.is_json() {
            println!(
                "{}",
                formatter.error(&format!("{} file(s) left untouched", metrics.failed))
            );
        }
        return Err(CliError::FilesFailed(metrics.failed));
    }

    Ok(())
}
