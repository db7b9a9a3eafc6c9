//! Filesystem slot storage
//!
//! Provides:
//! - One pretty-printed JSON file per slot
//! - Atomic writes
//! - Staged, all-or-nothing clear

mod atomic;
mod fs_slots;
mod layout;

pub use fs_slots::FsSlotStore;
