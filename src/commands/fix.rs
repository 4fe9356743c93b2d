use clap::Args;
use serde::Serialize;
use std::path::Path;

use fix_opacity::config::{self, FailurePolicy, RewriteConfig};
use fix_opacity::rewrite::{self, MatchMode, SubstitutionRule};
use fix_opacity::{FileOutcome, RewriteReport};

use crate::commands::CmdResult;

/// Exit code when the run finished but some files could not be rewritten.
pub const EXIT_FILES_FAILED: i32 = 3;

#[derive(Args, Debug, Default)]
pub struct FixArgs {
    /// Directory to scan (default: lib)
    #[arg(value_name = "ROOT")]
    pub path: Option<String>,

    /// Directory to scan (alternative to the positional ROOT)
    #[arg(long, value_name = "DIR", conflicts_with = "path")]
    pub root: Option<String>,

    /// File extension to rewrite, with or without the leading dot (default: dart)
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// JSON config file; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Match nested parentheses instead of stopping at the first `)`
    #[arg(long)]
    pub balanced: bool,

    /// Keep going after a file fails; exit non-zero at the end
    #[arg(long)]
    pub keep_going: bool,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Skip files whose root-relative path matches this glob (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Print a JSON report instead of per-file notices
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct RuleSummary {
    pub pattern: String,
    pub template: String,
    pub mode: String,
}

#[derive(Debug, Serialize)]
pub struct FixOutput {
    pub rule: RuleSummary,
    #[serde(flatten)]
    pub report: RewriteReport,
}

pub fn run(args: FixArgs) -> CmdResult<FixOutput> {
    let json = args.json;
    let config = resolve_config(args)?;
    let rule = SubstitutionRule::with_opacity()?;

    let report = rewrite::run(&rule, &config, |outcome| {
        if !json {
            print_notice(outcome, config.dry_run);
        }
    })?;

    crate::tty::status(&format!(
        "{} file(s) scanned, {} {}, {} failed",
        report.summary.scanned,
        report.summary.changed,
        if config.dry_run { "would change" } else { "fixed" },
        report.summary.failed
    ));

    let exit_code = if report.summary.failed > 0 {
        EXIT_FILES_FAILED
    } else {
        0
    };

    Ok((
        FixOutput {
            rule: RuleSummary {
                pattern: rule.pattern().to_string(),
                template: rule.template(),
                mode: config.mode.as_str().to_string(),
            },
            report,
        },
        exit_code,
    ))
}

/// Merge the config file (or built-in defaults) with command-line flags.
fn resolve_config(args: FixArgs) -> fix_opacity::Result<RewriteConfig> {
    let mut config = match args.config.as_deref() {
        Some(path) => config::load_config(Path::new(path))?,
        None => config::builtin_config(),
    };

    if let Some(root) = args.root.or(args.path) {
        config.root = root;
    }
    if let Some(extension) = args.extension {
        config.extension = extension;
    }
    if args.balanced {
        config.mode = MatchMode::Balanced;
    }
    if args.keep_going {
        config.on_error = FailurePolicy::Continue;
    }
    if args.dry_run {
        config.dry_run = true;
    }
    config.exclude.extend(args.exclude);

    config.validate()
}

fn print_notice(outcome: &FileOutcome, dry_run: bool) {
    if !outcome.is_fixed() {
        return;
    }
    let verb = if dry_run { "Would fix" } else { "Fixed" };
    crate::output::print_line(&format!("{} {}", verb, outcome.path));
}
