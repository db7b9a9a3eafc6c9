//! Filesystem-based slot store
//!
//! Each populated slot is one pretty-printed JSON file. A multi-slot clear
//! first moves every listed file into a staging directory, then commits by
//! renaming that directory, and only then deletes. A failure before the
//! commit rename puts every staged file back. If putting a file back fails
//! too, the clear reports `ClearIncomplete` and the next `open` or `clear`
//! restores the staged slot.

use crate::errors::{
    clear_incomplete, clear_rolled_back, corrupt_slot, encode_error, io_error, slot_io_error,
    Result,
};
use crate::slots::atomic::atomic_write;
use crate::slots::layout::{
    slot_file_name, slot_for_file_name, slot_path, COMMITTED_DIR, STAGING_DIR,
};
use jsoncmp_core::errors::{CompareError, ExError};
use jsoncmp_core::{SlotNumber, SlotStore};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Filesystem slot store rooted at a directory
#[derive(Debug)]
pub struct FsSlotStore {
    root: PathBuf,
}

impl FsSlotStore {
    /// Open a slot directory, creating it if needed
    ///
    /// Finishes or undoes any clear interrupted by a crash: a committed clear
    /// is completed, a staged-but-uncommitted one is rolled back.
    ///
    /// # Errors
    ///
    /// `Io` if the directory cannot be created or recovery fails.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { root: root.into() };
        fs::create_dir_all(&store.root).map_err(|e| io_error("create_slot_dir", e))?;
        store.recover()?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn recover(&self) -> Result<()> {
        let committed = self.root.join(COMMITTED_DIR);
        if committed.exists() {
            fs::remove_dir_all(&committed).map_err(|e| io_error("recover_committed_clear", e))?;
            debug!(root = %self.root.display(), "completed interrupted clear");
        }

        let staging = self.root.join(STAGING_DIR);
        if !staging.exists() {
            return Ok(());
        }

        let entries = fs::read_dir(&staging).map_err(|e| io_error("recover_staged_clear", e))?;
        for entry in entries {
            let entry = entry.map_err(|e| io_error("recover_staged_clear", e))?;
            let staged = entry.path();
            let target = entry
                .file_name()
                .to_str()
                .and_then(slot_for_file_name)
                .map(|slot| slot_path(&self.root, slot));

            match target {
                Some(target) if !target.exists() => {
                    fs::rename(&staged, &target)
                        .map_err(|e| io_error("recover_staged_clear", e))?;
                    debug!(file = %target.display(), "restored slot from interrupted clear");
                }
                // Slot was stored again since, or the entry is not ours
                _ => remove_any(&staged).map_err(|e| io_error("recover_staged_clear", e))?,
            }
        }

        fs::remove_dir(&staging).map_err(|e| io_error("recover_staged_clear", e))?;
        Ok(())
    }

    fn clear_with<F>(&self, slots: &[SlotNumber], rename: F) -> Result<()>
    where
        F: Fn(&Path, &Path) -> io::Result<()>,
    {
        self.recover()?;

        let mut present: Vec<SlotNumber> =
            slots.iter().copied().filter(|s| self.exists(*s)).collect();
        present.sort();
        present.dedup();
        if present.is_empty() {
            return Ok(());
        }

        let staging = self.root.join(STAGING_DIR);
        fs::create_dir(&staging).map_err(|e| io_error("create_clear_staging", e))?;

        let mut staged = Vec::with_capacity(present.len());
        for slot in present {
            let from = slot_path(&self.root, slot);
            let to = staging.join(slot_file_name(slot));
            if let Err(e) = rename(&from, &to) {
                let cause = slot_io_error("stage_slot", slot, e);
                return Err(self.roll_back(&staging, &staged, &rename, &cause));
            }
            staged.push(slot);
        }

        let committed = self.root.join(COMMITTED_DIR);
        if let Err(e) = rename(&staging, &committed) {
            let cause = io_error("commit_clear", e);
            return Err(self.roll_back(&staging, &staged, &rename, &cause));
        }

        // Slots already read as empty; a leftover directory is swept by recover()
        if let Err(e) = fs::remove_dir_all(&committed) {
            warn!(error = %e, "failed to remove committed clear directory");
        }

        debug!(slots = ?staged, "cleared slots");
        Ok(())
    }

    /// Put staged slots back and build the error for the failed clear
    fn roll_back<F>(
        &self,
        staging: &Path,
        staged: &[SlotNumber],
        rename: &F,
        cause: &ExError,
    ) -> ExError
    where
        F: Fn(&Path, &Path) -> io::Result<()>,
    {
        let mut restored = true;
        for slot in staged.iter().rev() {
            let from = staging.join(slot_file_name(*slot));
            if let Err(e) = rename(&from, &slot_path(&self.root, *slot)) {
                warn!(slot = slot.get(), error = %e, "failed to restore staged slot");
                restored = false;
            }
        }

        if restored {
            let _ = fs::remove_dir(staging);
            clear_rolled_back(cause)
        } else {
            clear_incomplete(cause)
        }
    }
}

impl SlotStore for FsSlotStore {
    fn put(&mut self, slot: SlotNumber, value: Value) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&value).map_err(|e| encode_error(slot, e))?;
        atomic_write(&slot_path(&self.root, slot), &bytes).map_err(|e| e.with_slot(slot))?;
        debug!(slot = slot.get(), bytes = bytes.len(), "stored slot");
        Ok(())
    }

    fn exists(&self, slot: SlotNumber) -> bool {
        slot_path(&self.root, slot).is_file()
    }

    fn get(&self, slot: SlotNumber) -> Result<Value> {
        let bytes = match fs::read(slot_path(&self.root, slot)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CompareError::SlotEmpty { slot }.into())
            }
            Err(e) => return Err(slot_io_error("slot_read", slot, e)),
        };
        serde_json::from_slice(&bytes).map_err(|e| corrupt_slot(slot, e))
    }

    fn clear(&mut self, slots: &[SlotNumber]) -> Result<()> {
        self.clear_with(slots, |from, to| fs::rename(from, to))
    }
}

fn remove_any(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
