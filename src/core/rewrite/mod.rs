//! Call-site migration across a source tree.
//!
//! Walks the configured root, applies a [`SubstitutionRule`] to every matching
//! file, and overwrites only the files whose content changed. Each file is
//! read fully into memory before it is written, so a file is either left
//! byte-identical or replaced wholesale.

mod rule;
mod walker;

pub use rule::{MatchMode, Rewrite, SubstitutionRule};
pub use walker::walk_files;

use std::path::Path;

use crate::config::{FailurePolicy, RewriteConfig};
use crate::error::Result;
use crate::output::{FileOutcome, FileStatus, RewriteReport};
use crate::utils::io;

/// Read, rewrite, and (unless dry-running) write back a single file.
pub fn process_file(path: &Path, rule: &SubstitutionRule, config: &RewriteConfig) -> Result<FileStatus> {
    let content = io::read_text(path)?;
    let rewrite = rule.apply(&content, config.mode);

    if rewrite.content == content {
        return Ok(FileStatus::Unchanged);
    }

    if !config.dry_run {
        io::overwrite(path, &rewrite.content)?;
    }

    Ok(FileStatus::Fixed {
        replacements: rewrite.replacements,
    })
}

/// Apply `rule` to every file the walker yields for `config`.
///
/// `on_outcome` sees each file as soon as it is processed, in traversal order.
/// Under [`FailurePolicy::Abort`] the first error is returned and later files
/// are not touched; under [`FailurePolicy::Continue`] it is recorded in the
/// report and the walk goes on.
pub fn run<F>(rule: &SubstitutionRule, config: &RewriteConfig, mut on_outcome: F) -> Result<RewriteReport>
where
    F: FnMut(&FileOutcome),
{
    let root = config.root_path();
    let files = walk_files(&root, config);
    let mut report = RewriteReport::new(root.display().to_string(), config.dry_run);

    log_status!("rewrite", "Scanning {} .{} file(s) under {}", files.len(), config.extension, root.display());

    for file in &files {
        let status = match process_file(file, rule, config) {
            Ok(status) => status,
            Err(err) => match config.on_error {
                FailurePolicy::Abort => return Err(err),
                FailurePolicy::Continue => {
                    log_status!("rewrite", "Failed {}: {}", file.display(), err);
                    FileStatus::Failed {
                        error: err.to_string(),
                    }
                }
            },
        };

        let outcome = FileOutcome {
            path: file.display().to_string(),
            status,
        };
        on_outcome(&outcome);
        report.record(outcome);
    }

    Ok(report)
}

/// Run the built-in `withOpacity` migration with `config`.
pub fn rewrite_tree(config: &RewriteConfig) -> Result<RewriteReport> {
    let rule = SubstitutionRule::with_opacity()?;
    run(&rule, config, |_| {})
}
