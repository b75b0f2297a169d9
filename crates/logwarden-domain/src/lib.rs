//! Logwarden Domain Layer
//!
//! Pure engine behind logwarden: it turns the current full content of a file
//! into its next full content, deterministically and without I/O. Reading and
//! writing files is left to `logwarden-janitor`.
//!
//! ## Key Concepts
//!
//! - **Stanza**: one brace-delimited logrotate block for one or more globs
//! - **Retention**: days of logs to keep, turned into a `rotate` count through
//!   the interval divisor (daily=1, weekly=7, monthly=30, yearly=180)
//! - **Override**: per-file rule forcing a rotate count, interval or size
//! - **Schedule**: when the daily rotation trigger fires (`unset`, `set,HH:MM`,
//!   `random,HH:MM,HH:MM`)
//! - **Tier**: cron frequency bucket holding the trigger script
//!
//! ## Example
//!
//! ```
//! use logwarden_domain::{ensure_header, rewrite, OverrideSet, DEFAULT_BANNER};
//!
//! let raw = "/var/log/apt/history.log {\n  rotate 12\n  weekly\n}\n";
//! let body = rewrite(raw, "/etc/logrotate.d/apt", 28, &OverrideSet::default()).unwrap();
//! let out = ensure_header(&body, DEFAULT_BANNER);
//!
//! assert!(out.ends_with("/var/log/apt/history.log {\n  rotate 4\n  weekly\n}\n"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod crontab;
pub mod error;
pub mod header;
pub mod interval;
pub mod overrides;
pub mod rewrite;
pub mod schedule;
pub mod stanza;
pub mod tier;

// Re-exports for convenience
pub use crontab::{patch_daily_entry, CrontabPatch, DAILY_TRIGGER};
pub use error::{DomainError, Result};
pub use header::{ensure_header, BANNER_PREFIX, DEFAULT_BANNER};
pub use interval::{calculate_count, Interval};
pub use overrides::{EffectivePolicy, OverrideRule, OverrideSet, Period};
pub use rewrite::{keeps_existing_count, rewrite};
pub use schedule::{validate_cron_conf, ClockTime, CronPlan, ScheduleSpec};
pub use stanza::{parse_stanzas, Stanza};
pub use tier::CronTier;
