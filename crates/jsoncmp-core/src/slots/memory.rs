//! In-memory slot store.

use crate::errors::{CompareError, Result};
use crate::slots::{SlotNumber, SlotStore};
use serde_json::Value;

/// Slot pair held in process memory
///
/// Starts empty. Contents are lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    slots: [Option<Value>; 2],
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStore for MemorySlotStore {
    fn put(&mut self, slot: SlotNumber, value: Value) -> Result<()> {
        self.slots[slot.index()] = Some(value);
        Ok(())
    }

    fn exists(&self, slot: SlotNumber) -> bool {
        self.slots[slot.index()].is_some()
    }

    fn get(&self, slot: SlotNumber) -> Result<Value> {
        self.slots[slot.index()]
            .clone()
            .ok_or_else(|| CompareError::SlotEmpty { slot }.into())
    }

    fn clear(&mut self, slots: &[SlotNumber]) -> Result<()> {
        for slot in slots {
            self.slots[slot.index()] = None;
        }
        Ok(())
    }
}
