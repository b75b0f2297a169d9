//! Writes the daily schedule into the system crontab

use crate::fsutil::write_atomic;
use crate::{JanitorError, Result};
use logwarden_domain::{patch_daily_entry, ScheduleSpec};
use std::fs;
use std::path::{Path, PathBuf};

/// Rewrites the cron.daily entry of a crontab file
#[derive(Debug, Clone)]
pub struct CrontabWriter {
    path: PathBuf,
    dry_run: bool,
}

impl CrontabWriter {
    /// Writer for the crontab at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            dry_run: false,
        }
    }

    /// Compute the new line but leave the file alone
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Crontab being managed
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the time fields of the cron.daily entry with `pattern`
    ///
    /// Returns the rewritten line. The file is untouched when no entry matches.
    pub fn write_to_crontab(&self, pattern: &str) -> Result<String> {
        let current =
            fs::read_to_string(&self.path).map_err(|e| JanitorError::io(&self.path, e))?;
        let patch = patch_daily_entry(&current, pattern)?;

        if patch.matches > 1 {
            tracing::warn!(
                "{} has {} cron.daily entries, only line {} was updated",
                self.path.display(),
                patch.matches,
                patch.line_number
            );
        }

        if patch.content == current {
            tracing::debug!("{} already runs cron.daily at '{}'", self.path.display(), pattern);
        } else if self.dry_run {
            tracing::info!("DRY RUN: Would set cron.daily to '{}'", pattern);
        } else {
            write_atomic(&self.path, &patch.content)?;
            tracing::info!(
                "Set cron.daily in {} to '{}'",
                self.path.display(),
                pattern
            );
        }
        Ok(patch.line)
    }

    /// Render a validated schedule and write it
    pub fn update_cron_daily_schedule(&self, schedule: &ScheduleSpec) -> Result<String> {
        self.write_to_crontab(&schedule.pattern())
    }
}
