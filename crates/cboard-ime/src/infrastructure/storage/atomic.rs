//! Atomic document replacement.
//!
//! A save must never leave a truncated settings file behind, even if the
//! process dies half way through.  [`write_atomic`] therefore:
//!
//! 1. writes the full content to a side file next to the document
//!    (`cboard_settings.json.tmp`);
//! 2. flushes it to stable storage with `sync_all`;
//! 3. renames the side file over the document.
//!
//! `rename` within one directory replaces the destination in a single step
//! on every supported platform, so a reader sees either the old document or
//! the new one.  If any step fails the side file is removed and the existing
//! document is left exactly as it was.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::error::StoreError;

/// Returns `path` with `suffix` appended to its file name.
///
/// `/data/cboard_settings.json` + `.tmp` → `/data/cboard_settings.json.tmp`.
pub fn temp_path_for(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Replaces the file at `path` with `contents`, staging through `temp_path`.
///
/// Creates the parent directory if it does not exist.
///
/// # Errors
///
/// Returns [`StoreError::Io`] naming the path that failed.  On error the file
/// at `path` is unchanged and `temp_path` has been removed.
pub fn write_atomic(path: &Path, temp_path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| StoreError::io(dir, source))?;
    }

    if let Err(e) = write_and_sync(temp_path, contents) {
        discard(temp_path);
        return Err(e);
    }

    if let Err(source) = fs::rename(temp_path, path) {
        discard(temp_path);
        return Err(StoreError::io(path, source));
    }

    sync_parent_dir(path);
    Ok(())
}

fn write_and_sync(temp_path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let mut file = File::create(temp_path).map_err(|source| StoreError::io(temp_path, source))?;
    file.write_all(contents)
        .map_err(|source| StoreError::io(temp_path, source))?;
    file.sync_all()
        .map_err(|source| StoreError::io(temp_path, source))
}

/// Best-effort removal of a leftover side file.
fn discard(temp_path: &Path) {
    match fs::remove_file(temp_path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("could not remove temp file {}: {e}", temp_path.display()),
    }
}

/// Persists the rename itself.  Failure only weakens durability, not
/// atomicity, so it is logged and ignored.
#[cfg(unix)]
fn sync_parent_dir(path: &Path) {
    let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) else {
        return;
    };
    if let Err(e) = File::open(dir).and_then(|d| d.sync_all()) {
        tracing::debug!("could not sync directory {}: {e}", dir.display());
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) {}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cboard_atomic_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_temp_path_appends_suffix_to_file_name() {
        let temp = temp_path_for(Path::new("/data/cboard_settings.json"), ".tmp");
        assert_eq!(temp, PathBuf::from("/data/cboard_settings.json.tmp"));
    }

    #[test]
    fn test_write_atomic_creates_file_and_leaves_no_temp() {
        // Arrange
        let dir = scratch_dir();
        let path = dir.join("doc.json");
        let temp = temp_path_for(&path, ".tmp");

        // Act
        write_atomic(&path, &temp, b"{\"a\":1}").unwrap();

        // Assert
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}");
        assert!(!temp.exists(), "temp file must be promoted, not left behind");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_atomic_replaces_existing_document() {
        let dir = scratch_dir();
        let path = dir.join("doc.json");
        let temp = temp_path_for(&path, ".tmp");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, &temp, b"new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_atomic_creates_missing_parent_directory() {
        let dir = scratch_dir();
        let path = dir.join("nested").join("deeper").join("doc.json");
        let temp = temp_path_for(&path, ".tmp");

        write_atomic(&path, &temp, b"x").unwrap();

        assert!(path.exists());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_failed_temp_write_leaves_existing_document_intact() {
        // Arrange: a directory squatting on the temp path makes File::create fail
        let dir = scratch_dir();
        let path = dir.join("doc.json");
        let temp = temp_path_for(&path, ".tmp");
        fs::write(&path, "previous").unwrap();
        fs::create_dir_all(&temp).unwrap();

        // Act
        let result = write_atomic(&path, &temp, b"replacement");

        // Assert
        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_stale_temp_file_is_overwritten() {
        let dir = scratch_dir();
        let path = dir.join("doc.json");
        let temp = temp_path_for(&path, ".tmp");
        fs::write(&temp, "half-written garbage from a crash").unwrap();

        write_atomic(&path, &temp, b"fresh").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh");
        assert!(!temp.exists());
        fs::remove_dir_all(&dir).ok();
    }
}
