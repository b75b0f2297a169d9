//! Daily schedule specification
//!
//! Grammar of the `cron_daily_schedule` setting:
//!
//! ```text
//! unset
//! set,HH:MM
//! random,HH:MM,HH:MM
//! ```
//!
//! A validated schedule renders to the minute and hour fields of the crontab
//! line that triggers `/etc/cron.daily`.

use crate::error::{DomainError, Result};
use crate::tier::CronTier;
use std::fmt;

/// Minute field of the stock Debian/Ubuntu cron.daily entry
pub const LEGACY_MINUTE: u8 = 25;

/// Hour field of the stock Debian/Ubuntu cron.daily entry
pub const LEGACY_HOUR: u8 = 6;

/// Hour and minute of the day
///
/// Ordering is lexicographic on (hour, minute).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
}

impl ClockTime {
    /// Create a time, rejecting out-of-range fields
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 {
            return Err(DomainError::invalid_cron(format!(
                "hour {} out of range 0-23",
                hour
            )));
        }
        if minute > 59 {
            return Err(DomainError::invalid_cron(format!(
                "minute {} out of range 0-59",
                minute
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Parse `HH:MM`
    pub fn parse(s: &str) -> Result<Self> {
        let (hour, minute) = s
            .split_once(':')
            .ok_or_else(|| DomainError::invalid_cron(format!("'{}' is not HH:MM", s)))?;
        Self::new(parse_field(hour, s)?, parse_field(minute, s)?)
    }
}

fn parse_field(field: &str, whole: &str) -> Result<u8> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::invalid_cron(format!(
            "'{}' is not HH:MM",
            whole
        )));
    }
    field
        .parse()
        .map_err(|_| DomainError::invalid_cron(format!("'{}' is not HH:MM", whole)))
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// When the daily rotation trigger fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSpec {
    /// Keep the stock `25 6` schedule
    Unset,

    /// Fire at a fixed time
    Fixed(ClockTime),

    /// Let cron pick a random time within the window
    Random {
        /// Window start
        start: ClockTime,
        /// Window end, not before `start`
        end: ClockTime,
    },
}

impl ScheduleSpec {
    /// Parse and validate a schedule string
    pub fn parse(spec: &str) -> Result<Self> {
        let parts: Vec<&str> = spec.trim().split(',').map(str::trim).collect();
        match parts.as_slice() {
            ["unset"] => Ok(ScheduleSpec::Unset),
            ["set", time] => Ok(ScheduleSpec::Fixed(ClockTime::parse(time)?)),
            ["random", start, end] => {
                let start = ClockTime::parse(start)?;
                let end = ClockTime::parse(end)?;
                if start > end {
                    return Err(DomainError::invalid_cron(format!(
                        "random window ends at {} before it starts at {}",
                        end, start
                    )));
                }
                Ok(ScheduleSpec::Random { start, end })
            }
            _ => Err(DomainError::invalid_cron(format!(
                "'{}' is not one of 'unset', 'set,HH:MM' or 'random,HH:MM,HH:MM'",
                spec
            ))),
        }
    }

    /// Render the minute and hour crontab fields
    ///
    /// Random windows use the `~` range syntax of cronie, minute range first.
    pub fn pattern(&self) -> String {
        match self {
            ScheduleSpec::Unset => format!("{} {}", LEGACY_MINUTE, LEGACY_HOUR),
            ScheduleSpec::Fixed(at) => format!("{:02} {:02}", at.minute, at.hour),
            ScheduleSpec::Random { start, end } => format!(
                "{:02}~{:02} {:02}~{:02}",
                start.minute, end.minute, start.hour, end.hour
            ),
        }
    }
}

impl std::str::FromStr for ScheduleSpec {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ScheduleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleSpec::Unset => f.write_str("unset"),
            ScheduleSpec::Fixed(at) => write!(f, "set,{}", at),
            ScheduleSpec::Random { start, end } => write!(f, "random,{},{}", start, end),
        }
    }
}

/// Cron settings after validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CronPlan {
    /// Tier to install the trigger into; `None` when the job is disabled
    pub tier: Option<CronTier>,

    /// Daily schedule for the crontab entry
    pub schedule: ScheduleSpec,
}

impl CronPlan {
    /// Whether the trigger script should be installed
    pub fn enabled(&self) -> bool {
        self.tier.is_some()
    }
}

/// Validate the enabled flag, frequency ordinal and daily schedule together
///
/// An enabled job needs a frequency naming one of the four tiers. A disabled
/// job ignores the frequency. The schedule is always validated.
pub fn validate_cron_conf(
    enabled: bool,
    frequency: Option<u8>,
    daily_schedule: &str,
) -> Result<CronPlan> {
    let tier = if enabled {
        let ordinal = frequency.ok_or_else(|| {
            DomainError::invalid_cron("cronjob_frequency is required when the cron job is enabled")
        })?;
        let tier = CronTier::from_ordinal(ordinal).ok_or_else(|| {
            DomainError::invalid_cron(format!(
                "cronjob_frequency {} does not name a tier (0=hourly, 1=daily, 2=weekly, 3=monthly)",
                ordinal
            ))
        })?;
        Some(tier)
    } else {
        None
    };

    Ok(CronPlan {
        tier,
        schedule: ScheduleSpec::parse(daily_schedule)?,
    })
}
