//! Crash-safe slot file replacement
//!
//! Content goes to `<name>.tmp` beside the target, is flushed to disk, then
//! renamed over the target. A reader sees the old file or the new one.

use crate::errors::{io_error, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn temp_path_for(target: &Path) -> PathBuf {
    target.with_extension("tmp")
}

fn write_synced(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.sync_all()
}

/// Replace `target_path` with `content`
///
/// The parent directory is created when missing. On failure the temp file is
/// removed and the previous content, if any, is left in place.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_slot_dir", e))?;
    }

    let temp_path = temp_path_for(target_path);
    let staged = write_synced(&temp_path, content)
        .map_err(|e| io_error("write_slot_temp", e))
        .and_then(|()| {
            fs::rename(&temp_path, target_path).map_err(|e| io_error("rename_slot_temp", e))
        });

    if staged.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    staged
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn leftover_temp_files(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .count()
    }

    #[test]
    fn test_write_then_replace() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("payload_1.json");

        atomic_write(&target, b"[1]").unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"[1]");

        atomic_write(&target, b"[2]").unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"[2]");
        assert_eq!(leftover_temp_files(temp_dir.path()), 0);
    }

    #[test]
    fn test_missing_parent_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("nested").join("payload_2.json");

        atomic_write(&target, b"null").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"null");
    }

    #[test]
    fn test_failed_rename_keeps_target_and_cleans_temp() {
        // A directory at the target path makes the rename fail
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("payload_1.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), b"x").unwrap();

        let err = atomic_write(&target, b"{}").unwrap_err();

        assert_eq!(err.op(), Some("rename_slot_temp"));
        assert!(target.join("keep").is_file());
        assert_eq!(leftover_temp_files(temp_dir.path()), 0);
    }
}
