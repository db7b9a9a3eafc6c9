//! On-disk layout of the slot directory
//!
//! ```text
//! <root>/payload_1.json
//! <root>/payload_2.json
//! <root>/.clear-staging/     slot files moved aside by an in-flight clear
//! <root>/.clear-committed/   staged files of a clear that has taken effect
//! ```

use jsoncmp_core::SlotNumber;
use std::path::{Path, PathBuf};

pub const STAGING_DIR: &str = ".clear-staging";
pub const COMMITTED_DIR: &str = ".clear-committed";

/// File name for a slot, e.g. `payload_1.json`
pub fn slot_file_name(slot: SlotNumber) -> String {
    format!("payload_{}.json", slot)
}

pub fn slot_path(root: &Path, slot: SlotNumber) -> PathBuf {
    root.join(slot_file_name(slot))
}

/// Slot whose file is called `name`, if any
pub fn slot_for_file_name(name: &str) -> Option<SlotNumber> {
    SlotNumber::ALL
        .into_iter()
        .find(|slot| slot_file_name(*slot) == name)
}
