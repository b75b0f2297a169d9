//! Whole-file writes and tolerant removals

use crate::error::{JanitorError, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `contents` in one step
///
/// The content goes to a temporary file in the same directory which is then
/// renamed over the target, so readers see either the old or the new file.
/// Permissions of an existing target are carried over.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| JanitorError::io(dir, e))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| JanitorError::io(tmp.path(), e))?;

    match fs::metadata(path) {
        Ok(meta) => tmp
            .as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| JanitorError::io(tmp.path(), e))?,
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(JanitorError::io(path, e)),
    }

    tmp.as_file()
        .sync_all()
        .map_err(|e| JanitorError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| JanitorError::io(path, e.error))?;
    Ok(())
}

/// Remove a file, treating "already absent" as success
///
/// Returns whether a file was actually removed.
pub fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(JanitorError::io(path, e)),
    }
}

/// Set mode 0755
#[cfg(unix)]
pub fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| JanitorError::io(path, e))
}

/// No-op where permission bits do not exist
#[cfg(not(unix))]
pub fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
