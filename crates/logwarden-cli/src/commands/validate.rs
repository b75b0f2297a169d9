//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::error::Result;
use crate::output::Formatter;
use logwarden_janitor::LogwardenConfig;

/// Execute the validate command.
pub fn execute_validate(
    args: ValidateArgs,
    config: &LogwardenConfig,
    formatter: &Formatter,
) -> Result<()> {
    config.validate()?;
    let plan = config.cron_plan()?;
    let pattern = plan.schedule.pattern();

    if formatter.is_json() {
        let json = serde_json::json!({
            "retention": config.retention,
            "overrides": config.override_set().len(),
            "cron_enabled": plan.enabled(),
            "cron_tier": plan.tier.map(|t| t.as_str()),
            "daily_schedule": plan.schedule.to_string(),
            "pattern": pattern,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("{}", formatter.success("Configuration is valid"));
        println!(
            "{}",
            formatter.info(&format!(
                "Retention: {} days, {} override(s)",
                config.retention,
                config.override_set().len()
            ))
        );
        match plan.tier {
            Some(tier) => println!(
                "{}",
                formatter.info(&format!("Trigger tier: {}", tier.as_str()))
            ),
            None => println!("{}", formatter.warning("Cron job disabled")),
        }
        println!(
            "{}",
            formatter.info(&format!("cron.daily pattern: {}", pattern))
        );
    }

    if args.show {
        println!("{}", toml::to_string_pretty(config)?);
    }

    Ok(())
}
