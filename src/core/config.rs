use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::rewrite::MatchMode;
use crate::utils::{io, paths};

/// What to do when a matched file cannot be read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop at the first failing file.
    #[default]
    Abort,
    /// Record the failure and keep going; the run fails at the end.
    Continue,
}

/// Everything the walker needs besides the substitution rule itself.
///
/// Loadable from a JSON file; every field falls back to the built-in default
/// so an empty `{}` is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteConfig {
    #[serde(default = "default_root")]
    pub root: String,

    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default)]
    pub mode: MatchMode,

    #[serde(default)]
    pub on_error: FailurePolicy,

    #[serde(default)]
    pub dry_run: bool,

    /// Directory names never descended into, at any depth. Empty by default.
    #[serde(default)]
    pub skip_dirs: Vec<String>,

    /// Directory names skipped only directly under the root. Empty by default.
    #[serde(default)]
    pub root_only_skip_dirs: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            extension: default_extension(),
            mode: MatchMode::default(),
            on_error: FailurePolicy::default(),
            dry_run: false,
            skip_dirs: Vec::new(),
            root_only_skip_dirs: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_root() -> String {
    "lib".to_string()
}

fn default_extension() -> String {
    "dart".to_string()
}

// =============================================================================
// Loading and validation
// =============================================================================

impl RewriteConfig {
    /// Resolved traversal root, with `~` expanded.
    pub fn root_path(&self) -> PathBuf {
        paths::expand(&self.root)
    }

    /// Normalize and validate user-supplied values.
    ///
    /// The extension is accepted with or without a leading dot.
    pub fn validate(mut self) -> Result<Self> {
        let extension = self.extension.trim().trim_start_matches('.').to_string();
        if extension.is_empty() {
            return Err(Error::config_invalid_value(
                "extension",
                Some(self.extension),
                "Extension must not be empty",
            ));
        }
        self.extension = extension;

        if self.root.trim().is_empty() {
            return Err(Error::config_invalid_value(
                "root",
                Some(self.root),
                "Root directory must not be empty",
            ));
        }

        if let Some(pattern) = self.exclude.iter().find(|p| p.trim().is_empty()) {
            return Err(Error::config_invalid_value(
                "exclude",
                Some(pattern.clone()),
                "Exclude patterns must not be empty",
            ));
        }

        Ok(self)
    }
}

/// Load a config file. Missing fields take built-in defaults.
pub fn load_config(path: &Path) -> Result<RewriteConfig> {
    let content = io::read_text(path)?;

    serde_json::from_str(&content)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))
}

/// Built-in config (ignoring any file).
pub fn builtin_config() -> RewriteConfig {
    RewriteConfig::default()
}
