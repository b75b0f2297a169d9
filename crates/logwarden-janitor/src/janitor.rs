//! Core Janitor implementation: retention rewrites of logrotate files

use crate::fsutil::write_atomic;
use crate::metrics::{FileOutcome, FileReport, JanitorMetrics};
use crate::{JanitorError, LogwardenConfig, Result};
use logwarden_domain::{ensure_header, keeps_existing_count, parse_stanzas, rewrite, OverrideSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Suffixes of files logrotate itself skips in its include directory
const IGNORED_SUFFIXES: [&str; 12] = [
    ".bak",
    ".disabled",
    ".dpkg-bak",
    ".dpkg-del",
    ".dpkg-dist",
    ".dpkg-new",
    ".dpkg-old",
    ".rpmnew",
    ".rpmorig",
    ".rpmsave",
    ".swp",
    "~",
];

/// Rewritten content of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Full next content, banner included
    pub content: String,

    /// Stanzas in the file
    pub stanzas: usize,

    /// Stanzas whose `rotate` value was kept instead of recomputed
    pub kept_counts: usize,
}

/// Janitor service enforcing the retention policy on logrotate files
///
/// Each file is read, rewritten in memory and written back whole. A failure
/// on one file is recorded and the sweep moves on to the next.
///
/// # Examples
///
/// ```no_run
/// use logwarden_janitor::{Janitor, LogwardenConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = LogwardenConfig::from_file("/etc/logwarden/config.toml")?;
/// let mut janitor = Janitor::new(config);
///
/// let reports = janitor.sweep()?;
/// println!("{} files\n{}", reports.len(), janitor.metrics().summary());
/// # Ok(())
/// # }
/// ```
pub struct Janitor {
    config: LogwardenConfig,
    overrides: OverrideSet,
    metrics: JanitorMetrics,
}

impl Janitor {
    /// Create a new Janitor with the given configuration
    pub fn new(config: LogwardenConfig) -> Self {
        let overrides = config.override_set();
        Self {
            config,
            overrides,
            metrics: JanitorMetrics::new(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &LogwardenConfig {
        &self.config
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &JanitorMetrics {
        &self.metrics
    }

    /// Logrotate files to manage, sorted
    ///
    /// Regular files of `logrotate_dir` (hidden files and package-manager
    /// leftovers excluded), plus override paths outside it that exist.
    pub fn logrotate_files(&self) -> Result<Vec<PathBuf>> {
        let dir = &self.config.logrotate_dir;
        let entries = fs::read_dir(dir).map_err(|e| JanitorError::io(dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| JanitorError::io(dir, e))?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('.') || IGNORED_SUFFIXES.iter().any(|s| name.ends_with(s)) {
                tracing::debug!("Ignoring {}", entry.path().display());
                continue;
            }
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }

        for extra in self.overrides.paths().map(PathBuf::from) {
            if files.contains(&extra) {
                continue;
            }
            if extra.is_file() {
                files.push(extra);
            } else {
                tracing::warn!("Override path {} is not a file, ignoring it", extra.display());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Compute the next content of a file without touching the disk
    ///
    /// Returns `None` for content without stanzas, which is left alone.
    pub fn render(&self, path: &Path, raw: &str) -> Result<Option<Rendered>> {
        let parsed = parse_stanzas(raw)?;
        if parsed.is_empty() {
            return Ok(None);
        }
        let key = path.to_string_lossy();

        let policy = self.overrides.resolve(&key);
        let kept_counts = parsed
            .iter()
            .filter(|stanza| keeps_existing_count(stanza, policy.as_ref()))
            .count();
        if kept_counts > 0 {
            tracing::info!(
                "{}: {} stanza(s) keep their rotate count, retention {} not applied; set rotate in the override to change it",
                path.display(),
                kept_counts,
                self.config.retention
            );
        }

        let body = rewrite(raw, &key, self.config.retention, &self.overrides)?;
        Ok(Some(Rendered {
            content: ensure_header(&body, &self.config.banner),
            stanzas: parsed.len(),
            kept_counts,
        }))
    }

    /// Read, rewrite and write back one file
    pub fn rewrite_file(&mut self, path: &Path) -> FileReport {
        let report = match self.process(path) {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!("Leaving {} untouched: {}", path.display(), e);
                FileReport::new(path, 0, FileOutcome::Failed(e.to_string()))
            }
        };
        self.metrics.record(&report);
        report
    }

    fn process(&self, path: &Path) -> Result<FileReport> {
        let raw = fs::read_to_string(path).map_err(|e| JanitorError::io(path, e))?;

        let Some(rendered) = self.render(path, &raw)? else {
            tracing::debug!("{} has no stanzas", path.display());
            return Ok(FileReport::new(path, 0, FileOutcome::NoStanzas));
        };

        if rendered.content == raw {
            tracing::debug!("{} already up to date", path.display());
            return Ok(FileReport::new(path, rendered.stanzas, FileOutcome::Unchanged));
        }

        if self.config.dry_run {
            tracing::info!(
                "DRY RUN: Would rewrite {} ({} stanzas)",
                path.display(),
                rendered.stanzas
            );
            return Ok(FileReport::new(path, rendered.stanzas, FileOutcome::WouldRewrite));
        }

        write_atomic(path, &rendered.content)?;
        tracing::info!("Rewrote {} ({} stanzas)", path.display(), rendered.stanzas);
        Ok(FileReport::new(path, rendered.stanzas, FileOutcome::Rewritten))
    }

    /// Rewrite every managed logrotate file
    ///
    /// Fails only when the file list cannot be built; per-file failures are
    /// reported in the returned list and counted in the metrics.
    pub fn sweep(&mut self) -> Result<Vec<FileReport>> {
        let start = Instant::now();

        let files = self.logrotate_files()?;
        tracing::debug!("Starting sweep over {} files", files.len());

        let reports: Vec<FileReport> = files.iter().map(|path| self.rewrite_file(path)).collect();

        self.metrics.record_sweep();
        self.metrics.total_runtime_ms += start.elapsed().as_millis();

        tracing::info!(
            "Sweep completed: {} rewritten, {} unchanged, {} failed",
            self.metrics.rewritten,
            self.metrics.unchanged,
            self.metrics.failed
        );
        Ok(reports)
    }
}
