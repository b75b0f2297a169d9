//! Configuration loading for the CLI.

use crate::cli::Cli;
use crate::error::{CliError, Result};
use logwarden_janitor::{LogwardenConfig, DEFAULT_CONFIG_PATH};
use std::fs;
use std::path::{Path, PathBuf};

/// Flags that adjust the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    /// Explicit configuration file
    pub path: Option<PathBuf>,

    /// JSON override list replacing the configured one
    pub overrides_json: Option<PathBuf>,

    /// Force dry-run mode
    pub dry_run: bool,
}

impl From<&Cli> for ConfigSource {
    fn from(cli: &Cli) -> Self {
        Self {
            path: cli.config.clone(),
            overrides_json: cli.overrides_json.clone(),
            dry_run: cli.dry_run,
        }
    }
}

impl ConfigSource {
    /// Load the configuration and apply command-line adjustments.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used when present and built-in defaults otherwise.
    pub fn load(&self) -> Result<LogwardenConfig> {
        let mut config = match &self.path {
            Some(path) => LogwardenConfig::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                LogwardenConfig::from_file(DEFAULT_CONFIG_PATH)?
            }
            None => {
                tracing::warn!(
                    "{} not found, using built-in defaults",
                    DEFAULT_CONFIG_PATH
                );
                LogwardenConfig::default()
            }
        };

        if let Some(path) = &self.overrides_json {
            let json = fs::read_to_string(path).map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            config.set_overrides_json(&json)?;
            tracing::debug!("Loaded {} override(s) from {}", config.overrides.len(), path.display());
        }

        config.dry_run |= self.dry_run;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_explicit_file_with_overrides() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "retention = 30\n").unwrap();
        let json_path = dir.path().join("overrides.json");
        fs::write(&json_path, r#"[{"path": "/etc/logrotate.d/apt", "rotate": 2}]"#).unwrap();

        let source = ConfigSource {
            path: Some(config_path),
            overrides_json: Some(json_path),
            dry_run: true,
        };
        let config = source.load().unwrap();

        assert_eq!(config.retention, 30);
        assert!(config.dry_run);
        assert_eq!(
            config.override_set().resolve("/etc/logrotate.d/apt").unwrap().rotate,
            Some(2)
        );
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let source = ConfigSource {
            path: Some(dir.path().join("absent.toml")),
            ..Default::default()
        };
        assert!(matches!(source.load(), Err(CliError::Janitor(_))));
    }

    #[test]
    fn test_missing_overrides_file_is_an_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "").unwrap();
        let source = ConfigSource {
            path: Some(config_path),
            overrides_json: Some(dir.path().join("absent.json")),
            dry_run: false,
        };
        assert!(matches!(source.load(), Err(CliError::Io { .. })));
    }

    #[test]
    fn test_invalid_overrides_json_rejected() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "").unwrap();
        let json_path = dir.path().join("overrides.json");
        fs::write(&json_path, r#"[{"path": "/x", "interval": "hourly"}]"#).unwrap();

        let source = ConfigSource {
            path: Some(config_path),
            overrides_json: Some(json_path),
            dry_run: false,
        };
        assert!(source.load().is_err());
    }
}
