//! Configuration for Janitor operations
//!
//! Loaded from TOML. Overrides can also arrive as the JSON list emitted by
//! deployment tooling; both shapes are validated here once and turned into a
//! typed [`OverrideSet`].

use crate::error::{JanitorError, Result};
use logwarden_domain::{
    validate_cron_conf, CronPlan, Interval, OverrideRule, OverrideSet, BANNER_PREFIX,
    DEFAULT_BANNER,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/logwarden/config.toml";

/// Configuration for a Janitor run
///
/// # Examples
///
/// ```
/// use logwarden_janitor::LogwardenConfig;
///
/// let config = LogwardenConfig::from_toml_str(r#"
///     retention = 90
///
///     [[overrides]]
///     path = "/etc/logrotate.d/apt"
///     rotate = 5
///
///     [cron]
///     frequency = 2
///     daily_schedule = "random,06:00,07:50"
/// "#).unwrap();
///
/// assert_eq!(config.retention, 90);
/// assert_eq!(config.override_set().len(), 1);
/// assert_eq!(config.cron_plan().unwrap().schedule.pattern(), "00~50 06~07");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogwardenConfig {
    /// Days of logs to keep
    /// Default: 180
    #[serde(default = "default_retention")]
    pub retention: u32,

    /// Directory holding the logrotate files to manage
    /// Default: /etc/logrotate.d
    #[serde(default = "default_logrotate_dir")]
    pub logrotate_dir: PathBuf,

    /// Banner comment written at the top of each managed file
    #[serde(default = "default_banner")]
    pub banner: String,

    /// Dry-run mode: log what would change without writing
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,

    /// Per-file override rules
    #[serde(default)]
    pub overrides: Vec<OverrideEntry>,

    /// Cron trigger settings
    #[serde(default)]
    pub cron: CronConfig,
}

/// One override as supplied from outside
///
/// Every field is optional at this boundary; entries without a path are
/// skipped when the [`OverrideSet`] is built. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
    /// Logrotate file the rule applies to
    #[serde(default)]
    pub path: Option<String>,

    /// Explicit rotate count
    #[serde(default)]
    pub rotate: Option<u32>,

    /// Interval keyword to force
    #[serde(default)]
    pub interval: Option<Interval>,

    /// Size threshold, verbatim
    #[serde(default)]
    pub size: Option<String>,
}

/// Cron trigger settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CronConfig {
    /// Install the trigger script
    /// Default: true
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Tier ordinal: 0=hourly, 1=daily, 2=weekly, 3=monthly
    /// Default: 1
    #[serde(default = "default_frequency")]
    pub frequency: Option<u8>,

    /// `unset`, `set,HH:MM` or `random,HH:MM,HH:MM`
    #[serde(default = "default_schedule")]
    pub daily_schedule: String,

    /// Directory holding the `cron.<tier>` directories
    #[serde(default = "default_cron_root")]
    pub root: PathBuf,

    /// System crontab holding the cron.daily entry
    #[serde(default = "default_crontab")]
    pub crontab: PathBuf,

    /// File name of the installed trigger script
    #[serde(default = "default_script_name")]
    pub script_name: String,

    /// Persisted state file, removed when the job is disabled
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Command run by the trigger script
    #[serde(default = "default_trigger_command")]
    pub trigger_command: String,
}

fn default_retention() -> u32 {
    180
}

fn default_logrotate_dir() -> PathBuf {
    PathBuf::from("/etc/logrotate.d")
}

fn default_banner() -> String {
    DEFAULT_BANNER.to_string()
}

fn default_true() -> bool {
    true
}

fn default_frequency() -> Option<u8> {
    Some(1)
}

fn default_schedule() -> String {
    "unset".to_string()
}

fn default_cron_root() -> PathBuf {
    PathBuf::from("/etc")
}

fn default_crontab() -> PathBuf {
    PathBuf::from("/etc/crontab")
}

fn default_script_name() -> String {
    "logwarden".to_string()
}

fn default_state_file() -> PathBuf {
    PathBuf::from("/etc/logwarden_cronjob_config")
}

fn default_trigger_command() -> String {
    format!("/usr/local/bin/logwarden --config {} apply", DEFAULT_CONFIG_PATH)
}

impl Default for LogwardenConfig {
    fn default() -> Self {
        Self {
            retention: default_retention(),
            logrotate_dir: default_logrotate_dir(),
            banner: default_banner(),
            dry_run: false,
            overrides: Vec::new(),
            cron: CronConfig::default(),
        }
    }
}

impl Default for CronConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency: default_frequency(),
            daily_schedule: default_schedule(),
            root: default_cron_root(),
            crontab: default_crontab(),
            script_name: default_script_name(),
            state_file: default_state_file(),
            trigger_command: default_trigger_command(),
        }
    }
}

impl LogwardenConfig {
    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| JanitorError::io(path, e))?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: LogwardenConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the override list with a JSON document
    ///
    /// Accepts the list shape deployment tooling emits:
    /// `[{"path": "/etc/logrotate.d/apt", "rotate": 5, "size": "1G"}]`.
    pub fn set_overrides_json(&mut self, json: &str) -> Result<()> {
        self.overrides = parse_overrides_json(json)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.retention == 0 {
            return Err(JanitorError::Config(
                "retention must be at least one day".to_string(),
            ));
        }
        if self.banner.contains('\n') || !self.banner.starts_with('#') {
            return Err(JanitorError::Config(
                "banner must be a single comment line starting with '#'".to_string(),
            ));
        }
        if !self.banner.starts_with(BANNER_PREFIX) {
            warn!(
                "banner does not start with '{}'; older banners will not be recognised",
                BANNER_PREFIX
            );
        }
        let script_name = &self.cron.script_name;
        if script_name.is_empty() || script_name.contains('/') {
            return Err(JanitorError::Config(format!(
                "cron.script_name '{}' must be a plain file name",
                script_name
            )));
        }
        if self.cron.trigger_command.contains('\n') {
            return Err(JanitorError::Config(
                "cron.trigger_command must be a single line".to_string(),
            ));
        }
        self.cron_plan()?;
        Ok(())
    }

    /// Validated cron plan (tier + schedule)
    pub fn cron_plan(&self) -> Result<CronPlan> {
        Ok(validate_cron_conf(
            self.cron.enabled,
            self.cron.frequency,
            &self.cron.daily_schedule,
        )?)
    }

    /// Typed override rules
    ///
    /// Entries without a path are skipped; a blank size counts as unset.
    pub fn override_set(&self) -> OverrideSet {
        self.overrides
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| {
                let Some(path) = entry.path.as_deref().map(str::trim).filter(|p| !p.is_empty())
                else {
                    warn!("override #{} has no path, ignoring it", idx);
                    return None;
                };
                let mut rule = OverrideRule::new(path);
                rule.rotate = entry.rotate;
                rule.interval = entry.interval;
                rule.size = entry
                    .size
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string);
                Some(rule)
            })
            .collect()
    }
}

/// Parse a JSON override list
pub fn parse_overrides_json(json: &str) -> Result<Vec<OverrideEntry>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(json)?)
}
