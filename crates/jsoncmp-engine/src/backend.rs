//! Slot backend selection

use jsoncmp_core::{MemorySlotStore, Result, SlotStore};
use jsoncmp_store::FsSlotStore;
use std::path::PathBuf;

/// Where slot payloads live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotBackend {
    /// Process memory; lost on restart
    Memory,
    /// `payload_{n}.json` files under the given directory
    Fs(PathBuf),
}

/// Open the configured backend as a boxed store
///
/// # Errors
///
/// `Io` if the filesystem directory cannot be created or recovered.
pub fn open_slot_store(backend: &SlotBackend) -> Result<Box<dyn SlotStore>> {
    match backend {
        SlotBackend::Memory => Ok(Box::new(MemorySlotStore::default())),
        SlotBackend::Fs(root) => {
            let store = FsSlotStore::open(root.clone())?;
            tracing::debug!(root = %store.root().display(), "opened filesystem slot store");
            Ok(Box::new(store))
        }
    }
}
