use std::path::{Path, PathBuf};

/// Expand a leading `~` to the home directory.
pub fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Path relative to `root`, with `/` separators on every platform.
pub fn relative_slash(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_slash_strips_root() {
        let root = Path::new("lib");
        let path = root.join("src").join("theme.dart");
        assert_eq!(relative_slash(&path, root), "src/theme.dart");
    }

    #[test]
    fn relative_slash_outside_root_keeps_path() {
        assert_eq!(relative_slash(Path::new("other/a.dart"), Path::new("lib")), "other/a.dart");
    }

    #[test]
    fn expand_leaves_plain_paths() {
        assert_eq!(expand("lib"), PathBuf::from("lib"));
    }
}
