use glob_match::glob_match;
use std::path::{Path, PathBuf};

use crate::config::RewriteConfig;
use crate::utils::paths;

/// Collect every file under `root` that the rewrite should visit.
///
/// Order follows directory entries as the OS yields them. A missing or
/// unreadable root (or subdirectory) contributes no files. Symlinked
/// directories are not followed.
pub fn walk_files(root: &Path, config: &RewriteConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk_recursive(root, root, config, &mut files);

    if !config.exclude.is_empty() {
        files.retain(|f| {
            let relative = paths::relative_slash(f, root);
            !config.exclude.iter().any(|pattern| glob_match(pattern, &relative))
        });
    }

    files
}

fn walk_recursive(dir: &Path, root: &Path, config: &RewriteConfig, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    let is_root = dir == root;

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            let name = entry.file_name().to_string_lossy().to_string();
            if config.skip_dirs.iter().any(|d| *d == name) {
                continue;
            }
            if is_root && config.root_only_skip_dirs.iter().any(|d| *d == name) {
                continue;
            }
            walk_recursive(&path, root, config, files);
        } else if (file_type.is_file() || (file_type.is_symlink() && path.is_file()))
            && has_extension(&path, &config.extension)
        {
            files.push(path);
        }
    }
}

/// Name-suffix match, so a file named exactly `.dart` counts as a `.dart` file.
fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name().is_some_and(|name| {
        let name = name.to_string_lossy();
        name.len() > extension.len()
            && name.ends_with(extension)
            && name[..name.len() - extension.len()].ends_with('.')
    })
}
