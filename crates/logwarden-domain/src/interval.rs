//! Interval module - rotation periods and retention arithmetic

use crate::error::{DomainError, Result};
use crate::stanza::{directive, is_script_start};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rotation period keyword of a logrotate stanza
///
/// Each interval maps to a fixed number of days per rotation, used to turn a
/// retention in days into a `rotate` count:
/// - Daily: 1
/// - Weekly: 7
/// - Monthly: 30
/// - Yearly: 180
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// `daily`
    Daily,

    /// `weekly`
    Weekly,

    /// `monthly`
    Monthly,

    /// `yearly`
    Yearly,
}

impl Interval {
    /// All intervals, in divisor order
    pub const ALL: [Interval; 4] = [
        Interval::Daily,
        Interval::Weekly,
        Interval::Monthly,
        Interval::Yearly,
    ];

    /// Get the directive keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "daily",
            Interval::Weekly => "weekly",
            Interval::Monthly => "monthly",
            Interval::Yearly => "yearly",
        }
    }

    /// Parse a directive keyword (exact, lowercase)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(Interval::Daily),
            "weekly" => Some(Interval::Weekly),
            "monthly" => Some(Interval::Monthly),
            "yearly" => Some(Interval::Yearly),
            _ => None,
        }
    }

    /// Days covered by one rotation
    pub fn divisor(&self) -> u32 {
        match self {
            Interval::Daily => 1,
            Interval::Weekly => 7,
            Interval::Monthly => 30,
            Interval::Yearly => 180,
        }
    }

    /// Rotations needed to keep `retention_days` of logs, rounded down
    pub fn rotation_count(&self, retention_days: u32) -> u32 {
        retention_days / self.divisor()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid interval: {}", s))
    }
}

/// Find the interval directive of a stanza
///
/// Lines inside script blocks (`postrotate` ... `endscript` and friends) are
/// shell commands and never count as directives.
pub fn find_interval(stanza_text: &str) -> Option<Interval> {
    let mut in_script = false;
    for line in stanza_text.lines() {
        let key = directive(line);
        if in_script {
            if key == "endscript" {
                in_script = false;
            }
            continue;
        }
        if is_script_start(key) {
            in_script = true;
            continue;
        }
        if let Some(interval) = Interval::parse(key) {
            return Some(interval);
        }
    }
    None
}

/// Compute the `rotate` count for a stanza from a retention in days
///
/// Zero is a legal result when the retention is shorter than one period.
pub fn calculate_count(stanza_text: &str, retention_days: u32) -> Result<u32> {
    let interval = find_interval(stanza_text).ok_or(DomainError::UnrecognizedInterval)?;
    Ok(interval.rotation_count(retention_days))
}
