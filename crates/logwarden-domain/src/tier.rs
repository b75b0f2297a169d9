//! Tier module - cron frequency buckets

use serde::{Deserialize, Serialize};

/// Cron frequency bucket holding the trigger script
///
/// Each tier is bound to a `cron.<tier>` directory run by run-parts:
/// - Hourly: `/etc/cron.hourly`
/// - Daily: `/etc/cron.daily`
/// - Weekly: `/etc/cron.weekly`
/// - Monthly: `/etc/cron.monthly`
///
/// The configured frequency is the zero-based ordinal of the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CronTier {
    /// Ordinal 0
    Hourly,

    /// Ordinal 1
    Daily,

    /// Ordinal 2
    Weekly,

    /// Ordinal 3
    Monthly,
}

impl CronTier {
    /// All tiers in ordinal order
    pub const ALL: [CronTier; 4] = [
        CronTier::Hourly,
        CronTier::Daily,
        CronTier::Weekly,
        CronTier::Monthly,
    ];

    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CronTier::Hourly => "hourly",
            CronTier::Daily => "daily",
            CronTier::Weekly => "weekly",
            CronTier::Monthly => "monthly",
        }
    }

    /// Parse a tier from its name
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hourly" => Some(CronTier::Hourly),
            "daily" => Some(CronTier::Daily),
            "weekly" => Some(CronTier::Weekly),
            "monthly" => Some(CronTier::Monthly),
            _ => None,
        }
    }

    /// Tier selected by a configured frequency ordinal
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal)).copied()
    }

    /// Ordinal of the tier
    pub fn ordinal(&self) -> u8 {
        match self {
            CronTier::Hourly => 0,
            CronTier::Daily => 1,
            CronTier::Weekly => 2,
            CronTier::Monthly => 3,
        }
    }

    /// Name of the run-parts directory, e.g. `cron.weekly`
    pub fn directory_name(&self) -> String {
        format!("cron.{}", self.as_str())
    }
}

impl std::str::FromStr for CronTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid cron tier: {}", s))
    }
}
