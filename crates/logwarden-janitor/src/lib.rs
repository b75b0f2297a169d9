//! Logwarden Janitor
//!
//! Host-side service applying the retention policy to logrotate files and
//! keeping the cron trigger in shape.
//!
//! # Overview
//!
//! The Janitor is responsible for:
//! - **Retention rewrites**: Rewriting every logrotate file so rotate counts match the policy
//! - **Crontab schedule**: Pointing the system cron.daily entry at the configured time
//! - **Trigger artifacts**: Installing the trigger script into exactly one cron tier
//! - **Metrics collection**: Tracking per-file outcomes for reporting
//!
//! All text processing lives in `logwarden-domain`; this crate reads, writes
//! and removes files around it.
//!
//! ## Cron tiers
//!
//! | Frequency | Tier | Script location |
//! |-----------|------|-----------------|
//! | 0 | Hourly | `/etc/cron.hourly/logwarden` |
//! | 1 | Daily | `/etc/cron.daily/logwarden` |
//! | 2 | Weekly | `/etc/cron.weekly/logwarden` |
//! | 3 | Monthly | `/etc/cron.monthly/logwarden` |
//!
//! # Usage
//!
//! ## One-time Sweep
//!
//! ```no_run
//! use logwarden_janitor::{Janitor, LogwardenConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LogwardenConfig::from_file("/etc/logwarden/config.toml")?;
//! let mut janitor = Janitor::new(config);
//!
//! janitor.sweep()?;
//! println!("{}", janitor.metrics().summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Cron reconciliation
//!
//! ```no_run
//! use logwarden_janitor::{CronArtifactManager, CrontabWriter, LogwardenConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LogwardenConfig::from_file("/etc/logwarden/config.toml")?;
//! let plan = config.cron_plan()?;
//!
//! CronArtifactManager::from_config(&config.cron, config.dry_run).reconcile(&plan)?;
//! let line = CrontabWriter::new(&config.cron.crontab).update_cron_daily_schedule(&plan.schedule)?;
//! println!("{}", line);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! retention = 180
//! logrotate_dir = "/etc/logrotate.d"
//! dry_run = false
//!
//! [[overrides]]
//! path = "/etc/logrotate.d/apt"
//! rotate = 5
//! interval = "monthly"
//!
//! [cron]
//! enabled = true
//! frequency = 1
//! daily_schedule = "random,06:00,07:50"
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod metrics;
mod janitor;
mod crontab;
mod artifacts;
pub mod fsutil;

pub use error::{JanitorError, Result};
pub use config::{
    parse_overrides_json, CronConfig, LogwardenConfig, OverrideEntry, DEFAULT_CONFIG_PATH,
};
pub use metrics::{FileOutcome, FileReport, JanitorMetrics};
pub use janitor::{Janitor, Rendered};
pub use crontab::CrontabWriter;
pub use artifacts::{read_state, CronArtifactManager, CronState, ReconcileReport};
