//! Installation and removal of the cron trigger script

use crate::config::CronConfig;
use crate::fsutil::{make_executable, remove_if_exists, write_atomic};
use crate::{JanitorError, Result};
use logwarden_domain::{CronPlan, CronTier};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted record of the last reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CronState {
    /// Always true; the file only exists while the job is enabled
    pub enabled: bool,

    /// Ordinal of the installed tier
    pub frequency: u8,

    /// Installed tier
    pub tier: CronTier,

    /// Daily schedule, in configuration syntax
    pub daily_schedule: String,
}

/// What a reconciliation changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Files that existed and were removed (or would be, in dry-run mode)
    pub removed: Vec<PathBuf>,

    /// Installed script, if any
    pub installed: Option<PathBuf>,
}

/// Keeps exactly one trigger script installed, in the configured tier
///
/// Every pass removes the script from all four tier directories plus the
/// state file, then installs afresh when the job is enabled.
#[derive(Debug, Clone)]
pub struct CronArtifactManager {
    root: PathBuf,
    script_name: String,
    state_file: PathBuf,
    trigger_command: String,
    dry_run: bool,
}

impl CronArtifactManager {
    /// Manager for the `[cron]` section of the configuration
    pub fn from_config(cron: &CronConfig, dry_run: bool) -> Self {
        Self {
            root: cron.root.clone(),
            script_name: cron.script_name.clone(),
            state_file: cron.state_file.clone(),
            trigger_command: cron.trigger_command.clone(),
            dry_run,
        }
    }

    /// Location of the trigger script for a tier
    pub fn script_path(&self, tier: CronTier) -> PathBuf {
        self.root.join(tier.directory_name()).join(&self.script_name)
    }

    /// Persisted state file
    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    /// Body of the trigger script
    pub fn script_contents(&self) -> String {
        format!("#!/bin/bash\n{}\n", self.trigger_command)
    }

    /// Bring the installed artifacts in line with `plan`
    pub fn reconcile(&self, plan: &CronPlan) -> Result<ReconcileReport> {
        let mut report = ReconcileReport::default();

        let stale = CronTier::ALL
            .iter()
            .map(|tier| self.script_path(*tier))
            .chain(std::iter::once(self.state_file.clone()));
        for path in stale {
            if self.remove(&path)? {
                tracing::debug!("Removed {}", path.display());
                report.removed.push(path);
            }
        }

        let Some(tier) = plan.tier else {
            tracing::info!("Cron job disabled, nothing installed");
            return Ok(report);
        };

        let script = self.script_path(tier);
        if self.dry_run {
            tracing::info!("DRY RUN: Would install {}", script.display());
            report.installed = Some(script);
            return Ok(report);
        }

        if let Some(dir) = script.parent() {
            fs::create_dir_all(dir).map_err(|e| JanitorError::io(dir, e))?;
        }
        write_atomic(&script, &self.script_contents())?;
        make_executable(&script)?;

        let state = CronState {
            enabled: true,
            frequency: tier.ordinal(),
            tier,
            daily_schedule: plan.schedule.to_string(),
        };
        write_atomic(&self.state_file, &serde_json::to_string_pretty(&state)?)?;

        tracing::info!("Installed {} ({} tier)", script.display(), tier.as_str());
        report.installed = Some(script);
        Ok(report)
    }

    fn remove(&self, path: &Path) -> Result<bool> {
        if self.dry_run {
            return Ok(path.exists());
        }
        remove_if_exists(path)
    }
}

/// Read a state file written by [`CronArtifactManager::reconcile`]
pub fn read_state(path: &Path) -> Result<CronState> {
    let contents = fs::read_to_string(path).map_err(|e| JanitorError::io(path, e))?;
    Ok(serde_json::from_str(&contents)?)
}
