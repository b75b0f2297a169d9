//! Per-path override rules

use crate::interval::Interval;
use serde::{Deserialize, Serialize};

/// A rule forcing directives for one logrotate file
///
/// Matched by exact equality against the path of the file being rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRule {
    /// Path of the logrotate file, e.g. `/etc/logrotate.d/apt`
    pub path: String,

    /// Explicit rotate count, replacing the computed one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<u32>,

    /// Interval keyword to display instead of the stanza's own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,

    /// Size threshold, passed through verbatim (e.g. `100`, `1G`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl OverrideRule {
    /// Create a rule with no directives set
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            rotate: None,
            interval: None,
            size: None,
        }
    }

    /// Set the explicit rotate count
    pub fn with_rotate(mut self, rotate: u32) -> Self {
        self.rotate = Some(rotate);
        self
    }

    /// Set the interval override
    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Set the size threshold
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }
}

/// What a stanza's period line becomes under an override
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Period {
    /// `daily`, `weekly`, `monthly` or `yearly`
    Interval(Interval),

    /// `size <value>`
    Size(String),
}

impl Period {
    /// Render as a directive (without indentation)
    pub fn directive(&self) -> String {
        match self {
            Period::Interval(interval) => interval.as_str().to_string(),
            Period::Size(size) => format!("size {}", size),
        }
    }
}

/// Sparse policy resolved for one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectivePolicy {
    /// Explicit rotate count
    pub rotate: Option<u32>,

    /// Interval override
    pub interval: Option<Interval>,

    /// Size threshold
    pub size: Option<String>,
}

impl EffectivePolicy {
    /// Forced period line, if any
    ///
    /// A size threshold wins over an interval override.
    pub fn period(&self) -> Option<Period> {
        match (&self.size, self.interval) {
            (Some(size), _) => Some(Period::Size(size.clone())),
            (None, Some(interval)) => Some(Period::Interval(interval)),
            (None, None) => None,
        }
    }
}

impl From<&OverrideRule> for EffectivePolicy {
    fn from(rule: &OverrideRule) -> Self {
        Self {
            rotate: rule.rotate,
            interval: rule.interval,
            size: rule.size.clone(),
        }
    }
}

/// Validated collection of override rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideSet {
    rules: Vec<OverrideRule>,
}

impl OverrideSet {
    /// Create a set from already-validated rules
    pub fn new(rules: Vec<OverrideRule>) -> Self {
        Self { rules }
    }

    /// Resolve the policy for a file path
    ///
    /// Linear scan; the first rule whose path equals `path` wins.
    pub fn resolve(&self, path: &str) -> Option<EffectivePolicy> {
        self.rules
            .iter()
            .find(|rule| rule.path == path)
            .map(EffectivePolicy::from)
    }

    /// Paths named by the rules, in declaration order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.path.as_str())
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set holds no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<OverrideRule> for OverrideSet {
    fn from_iter<I: IntoIterator<Item = OverrideRule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
