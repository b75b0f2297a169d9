//! Metrics collection for Janitor runs

use std::path::{Path, PathBuf};

/// What happened to one logrotate file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// New content written
    Rewritten,

    /// Dry run: content would have been written
    WouldRewrite,

    /// Content already matched the policy
    Unchanged,

    /// File holds no stanzas and was left alone
    NoStanzas,

    /// File could not be read, rewritten or written; it was left untouched
    Failed(String),
}

impl FileOutcome {
    /// Short label for reports
    pub fn label(&self) -> &'static str {
        match self {
            FileOutcome::Rewritten => "rewritten",
            FileOutcome::WouldRewrite => "would rewrite",
            FileOutcome::Unchanged => "unchanged",
            FileOutcome::NoStanzas => "no stanzas",
            FileOutcome::Failed(_) => "failed",
        }
    }
}

/// Result of processing one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// The logrotate file
    pub path: PathBuf,

    /// Stanzas found in the file
    pub stanzas: usize,

    /// Outcome
    pub outcome: FileOutcome,
}

impl FileReport {
    pub(crate) fn new(path: &Path, stanzas: usize, outcome: FileOutcome) -> Self {
        Self {
            path: path.to_path_buf(),
            stanzas,
            outcome,
        }
    }
}

/// Metrics collected during Janitor runs
///
/// Tracks files rewritten, unchanged and failed, plus stanza totals.
#[derive(Debug, Clone, Default)]
pub struct JanitorMetrics {
    /// Files written (or that would be written in dry-run mode)
    pub rewritten: usize,

    /// Files already matching the policy
    pub unchanged: usize,

    /// Files without stanzas
    pub skipped: usize,

    /// Files left untouched because of an error
    pub failed: usize,

    /// Stanzas processed across all files
    pub stanzas: usize,

    /// Total sweep iterations completed
    pub sweep_count: usize,

    /// Total runtime in milliseconds
    pub total_runtime_ms: u128,
}

impl JanitorMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one file
    pub fn record(&mut self, report: &FileReport) {
        match report.outcome {
            FileOutcome::Rewritten | FileOutcome::WouldRewrite => self.rewritten += 1,
            FileOutcome::Unchanged => self.unchanged += 1,
            FileOutcome::NoStanzas => self.skipped += 1,
            FileOutcome::Failed(_) => self.failed += 1,
        }
        self.stanzas += report.stanzas;
    }

    /// Record a sweep cycle completion
    pub fn record_sweep(&mut self) {
        self.sweep_count += 1;
    }

    /// Files seen across all categories
    pub fn total_files(&self) -> usize {
        self.rewritten + self.unchanged + self.skipped + self.failed
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let lines = [
            "Janitor Metrics Summary".to_string(),
            "======================".to_string(),
            format!("Sweep cycles: {}", self.sweep_count),
            format!("Total runtime: {}ms", self.total_runtime_ms),
            String::new(),
            format!("Files: {}", self.total_files()),
            format!("  Rewritten: {}", self.rewritten),
            format!("  Unchanged: {}", self.unchanged),
            format!("  No stanzas: {}", self.skipped),
            format!("  Failed: {}", self.failed),
            format!("Stanzas: {}", self.stanzas),
        ];
        lines.join("\n")
    }
}
