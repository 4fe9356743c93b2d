//! Public output types for rewrite runs.
//!
//! Used by the CLI for both the plain `Fixed <path>` notices and the JSON report.

use serde::Serialize;

/// What happened to one matched file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileStatus {
    /// No trigger found; the file was not written.
    Unchanged,
    /// Content was rewritten (or would be, in a dry run).
    Fixed { replacements: usize },
    /// Read or write failed.
    Failed { error: String },
}

/// Outcome for a single file in a run.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub path: String,
    #[serde(flatten)]
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn is_fixed(&self) -> bool {
        matches!(self.status, FileStatus::Fixed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, FileStatus::Failed { .. })
    }
}

/// Counts across a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewriteSummary {
    pub scanned: usize,
    pub changed: usize,
    pub failed: usize,
    pub replacements: usize,
}

impl RewriteSummary {
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.scanned += 1;
        match &outcome.status {
            FileStatus::Unchanged => {}
            FileStatus::Fixed { replacements } => {
                self.changed += 1;
                self.replacements += replacements;
            }
            FileStatus::Failed { .. } => self.failed += 1,
        }
    }
}

/// Full result of walking a tree.
///
/// Only files with a status other than `unchanged` are kept in `files`.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteReport {
    pub root: String,
    pub dry_run: bool,
    pub files: Vec<FileOutcome>,
    pub summary: RewriteSummary,
}

impl RewriteReport {
    pub fn new(root: String, dry_run: bool) -> Self {
        Self {
            root,
            dry_run,
            files: Vec::new(),
            summary: RewriteSummary::default(),
        }
    }

    pub fn record(&mut self, outcome: FileOutcome) {
        self.summary.record(&outcome);
        if outcome.status != FileStatus::Unchanged {
            self.files.push(outcome);
        }
    }

    pub fn failed_paths(&self) -> Vec<String> {
        self.files
            .iter()
            .filter(|f| f.is_failed())
            .map(|f| f.path.clone())
            .collect()
    }
}
