//! Cron command implementation.

use crate::cli::CronArgs;
use crate::error::Result;
use crate::output::Formatter;
use logwarden_janitor::{CronArtifactManager, CrontabWriter, LogwardenConfig};

/// Execute the cron command.
///
/// Artifacts are reconciled first; the crontab is only touched once that
/// succeeded.
pub fn execute_cron(args: CronArgs, config: &LogwardenConfig, formatter: &Formatter) -> Result<()> {
    let plan = config.cron_plan()?;

    let manager = CronArtifactManager::from_config(&config.cron, config.dry_run);
    let report = manager.reconcile(&plan)?;
    println!("{}", formatter.format_reconcile(&report)?);

    if args.skip_crontab {
        return Ok(());
    }

    let writer = CrontabWriter::new(&config.cron.crontab).with_dry_run(config.dry_run);
    let line = writer.update_cron_daily_schedule(&plan.schedule)?;
    if formatter.is_json() {
        println!("{}", serde_json::json!({ "crontab_line": line }));
    } else {
        println!(
            "{}",
            formatter.success(&format!("{}: {}", writer.path().display(), line))
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliFormat;
    use crate::error::CliError;
    use std::fs;
    use tempfile::tempdir;

    const CRONTAB: &str = "SHELL=/bin/sh\n25 6\t* * *\troot\ttest -x /usr/sbin/anacron || ( cd / && run-parts --report /etc/cron.daily )\n";

    fn config(root: &std::path::Path) -> LogwardenConfig {
        let mut config = LogwardenConfig::default();
        config.cron.root = root.to_path_buf();
        config.cron.crontab = root.join("crontab");
        config.cron.state_file = root.join("state");
        config
    }

    #[test]
    fn test_cron_installs_and_patches() {
        let dir = tempdir().unwrap();
        let mut config = config(dir.path());
        config.cron.daily_schedule = "set,23:59".to_string();
        fs::write(&config.cron.crontab, CRONTAB).unwrap();

        execute_cron(
            CronArgs { skip_crontab: false },
            &config,
            &Formatter::new(CliFormat::Table, false),
        )
        .unwrap();

        assert!(dir.path().join("cron.daily").join("logwarden").exists());
        assert!(fs::read_to_string(&config.cron.crontab)
            .unwrap()
            .contains("59 23\t* * *\troot"));
    }

    #[test]
    fn test_missing_entry_fails_after_reconcile() {
        let dir = tempdir().unwrap();
        let config = config(dir.path());
        fs::write(&config.cron.crontab, "SHELL=/bin/sh\n").unwrap();

        let err = execute_cron(
            CronArgs { skip_crontab: false },
            &config,
            &Formatter::new(CliFormat::Json, false),
        )
        .unwrap_err();

        assert!(matches!(err, CliError::Janitor(_)));
        assert!(dir.path().join("cron.daily").join("logwarden").exists());
    }

    #[test]
    fn test_skip_crontab() {
        let dir = tempdir().unwrap();
        let config = config(dir.path());

        execute_cron(
            CronArgs { skip_crontab: true },
            &config,
            &Formatter::new(CliFormat::Table, false),
        )
        .unwrap();

        assert!(!config.cron.crontab.exists());
    }
}
