//! Whole-file text access for config and source files.
//!
//! Every failure becomes an `internal.io_error` whose context names the
//! operation and the path, e.g. `read lib/theme.dart`.

use crate::error::{Error, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

fn context(operation: &str, path: &Path) -> Option<String> {
    Some(format!("{} {}", operation, path.display()))
}

/// Read a file that must be UTF-8 text.
///
/// Undecodable bytes are reported with the offset of the first bad byte
/// rather than the generic stream error.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::internal_io(e.to_string(), context("read", path)))?;

    String::from_utf8(bytes).map_err(|e| {
        Error::internal_io(
            format!("not valid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
            context("read", path),
        )
    })
}

/// Replace the content of an existing file.
///
/// The file is opened for writing without `create`, so a path that vanished
/// since it was read fails instead of being recreated. Permissions and
/// ownership stay as they were.
pub fn overwrite(path: &Path, content: &str) -> Result<()> {
    let write = || -> std::io::Result<()> {
        let mut file = OpenOptions::new().write(true).truncate(true).open(path)?;
        file.write_all(content.as_bytes())?;
        file.flush()
    };

    write().map_err(|e| Error::internal_io(e.to_string(), context("write", path)))
}
