//! Two-slot payload storage.
//!
//! A slot pair holds at most one parsed JSON value per slot. Slots move
//! Empty → Populated via [`SlotStore::put`] and back via [`SlotStore::clear`];
//! re-putting a populated slot replaces its value.
//!
//! Implementations are not internally synchronised. Callers that share a
//! store across threads wrap it in a lock held for the whole logical
//! operation (see the comparison orchestrator in `jsoncmp-engine`).

pub mod memory;

pub use memory::MemorySlotStore;

use crate::errors::{CompareError, Result};
use serde_json::Value;

/// Identifier of one of the two slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotNumber {
    One,
    Two,
}

impl SlotNumber {
    /// Both slots, in order
    pub const ALL: [SlotNumber; 2] = [SlotNumber::One, SlotNumber::Two];

    /// The slot's public number (1 or 2)
    pub fn get(self) -> u8 {
        match self {
            SlotNumber::One => 1,
            SlotNumber::Two => 2,
        }
    }

    pub(crate) fn index(self) -> usize {
        usize::from(self.get() - 1)
    }
}

impl TryFrom<i64> for SlotNumber {
    type Error = CompareError;

    fn try_from(slot_number: i64) -> std::result::Result<Self, Self::Error> {
        match slot_number {
            1 => Ok(SlotNumber::One),
            2 => Ok(SlotNumber::Two),
            _ => Err(CompareError::InvalidSlotNumber { slot_number }),
        }
    }
}

impl std::fmt::Display for SlotNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Storage for the slot pair
///
/// # Errors
///
/// Backends with real I/O report failures as `Persistence`/`Io` kinds.
/// `get` on an empty slot fails with `SlotEmpty`.
pub trait SlotStore: Send {
    /// Store `value` in `slot`, replacing whatever was there
    fn put(&mut self, slot: SlotNumber, value: Value) -> Result<()>;

    fn exists(&self, slot: SlotNumber) -> bool;

    /// Read the value held by `slot`
    fn get(&self, slot: SlotNumber) -> Result<Value>;

    /// Empty every listed slot
    ///
    /// Already-empty slots are skipped. Either all listed slots end up empty
    /// or, on error, none of them changed.
    fn clear(&mut self, slots: &[SlotNumber]) -> Result<()>;
}

impl<S: SlotStore + ?Sized> SlotStore for Box<S> {
    fn put(&mut self, slot: SlotNumber, value: Value) -> Result<()> {
        (**self).put(slot, value)
    }

    fn exists(&self, slot: SlotNumber) -> bool {
        (**self).exists(slot)
    }

    fn get(&self, slot: SlotNumber) -> Result<Value> {
        (**self).get(slot)
    }

    fn clear(&mut self, slots: &[SlotNumber]) -> Result<()> {
        (**self).clear(slots)
    }
}
