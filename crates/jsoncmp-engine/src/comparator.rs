//! Comparison orchestrator with boundary logging.
//!
//! [`Comparator`] owns the slot pair and exposes the four service
//! operations:
//! - `store`: validate and place a payload in a slot
//! - `compare_stored`: diff both slots, then clear them
//! - `reset`: clear both slots
//! - `status`: report which slots are populated
//!
//! ## Locking
//!
//! Each operation holds the slot lock from its first check to its last
//! write. Two concurrent compares therefore yield exactly one report, and
//! a store cannot land between another call's read and clear.
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging for these operations:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Slot backends use only `tracing::debug!()` for internal details.

use crate::outcome::{CompareReport, MessageOutcome, SlotStatus};
use jsoncmp_core::core_types::Sensitive;
use jsoncmp_core::errors::{CompareError, ExError, ExErrorKind, Result};
use jsoncmp_core::{diff_values, log_op_end, log_op_error, log_op_start, parse_payload};
use jsoncmp_core::{SlotNumber, SlotStore};
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// Orchestrates storage and comparison over one slot pair
pub struct Comparator<S = Box<dyn SlotStore>> {
    slots: Mutex<S>,
}

impl<S: SlotStore> Comparator<S> {
    pub fn new(store: S) -> Self {
        Self {
            slots: Mutex::new(store),
        }
    }

    /// Validate a payload and store it in a slot
    ///
    /// Validation happens before the lock is taken; a rejected request
    /// never touches the store.
    ///
    /// ## Errors
    ///
    /// - `InvalidSlot`: `slot_number` is not 1 or 2
    /// - `MalformedPayload`: the text does not parse as JSON
    /// - `Io` / `Persistence`: the backend failed to write
    /// - `Concurrency`: the slot lock is poisoned
    pub fn store(
        &self,
        slot_number: i64,
        raw_payload: &Sensitive<String>,
    ) -> Result<MessageOutcome> {
        log_op_start!(
            "store_payload",
            slot_number = slot_number,
            payload_bytes = raw_payload.byte_len()
        );
        let start = Instant::now();

        let result = self.store_impl(slot_number, raw_payload).map_err(|e| {
            log_op_error!(
                "store_payload",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                slot_number = slot_number
            );
            e
        })?;

        log_op_end!(
            "store_payload",
            duration_ms = start.elapsed().as_millis() as u64,
            slot_number = slot_number
        );

        Ok(result)
    }

    fn store_impl(
        &self,
        slot_number: i64,
        raw_payload: &Sensitive<String>,
    ) -> Result<MessageOutcome> {
        let slot = SlotNumber::try_from(slot_number)?;
        let value = parse_payload(raw_payload.expose())?;

        let mut slots = self.lock("store_payload")?;
        slots.put(slot, value)?;

        Ok(MessageOutcome::stored(slot))
    }

    /// Diff the two stored payloads and clear both slots
    ///
    /// The slots are cleared whether or not differences were found.
    ///
    /// ## Errors
    ///
    /// - `NotReady`: at least one slot is empty; nothing is cleared
    /// - `Io` / `Serialization` / `Persistence`: the backend failed to read
    ///   or clear
    /// - `Concurrency`: the slot lock is poisoned
    pub fn compare_stored(&self) -> Result<CompareReport> {
        log_op_start!("compare_stored");
        let start = Instant::now();

        let report = self.compare_stored_impl().map_err(|e| {
            log_op_error!(
                "compare_stored",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "compare_stored",
            duration_ms = start.elapsed().as_millis() as u64,
            diff_count = report.differences.len()
        );

        Ok(report)
    }

    fn compare_stored_impl(&self) -> Result<CompareReport> {
        let mut slots = self.lock("compare_stored")?;

        if !SlotNumber::ALL.iter().all(|slot| slots.exists(*slot)) {
            return Err(CompareError::NotReady.into());
        }

        let first = slots.get(SlotNumber::One)?;
        let second = slots.get(SlotNumber::Two)?;
        let differences = diff_values(&first, &second);

        slots.clear(&SlotNumber::ALL)?;

        Ok(CompareReport::completed(differences))
    }

    /// Clear both slots
    ///
    /// ## Errors
    ///
    /// - `Io` / `Persistence`: the backend failed to clear
    /// - `Concurrency`: the slot lock is poisoned
    pub fn reset(&self) -> Result<MessageOutcome> {
        log_op_start!("reset_slots");
        let start = Instant::now();

        self.lock("reset_slots")
            .and_then(|mut slots| slots.clear(&SlotNumber::ALL))
            .map_err(|e| {
                log_op_error!(
                    "reset_slots",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                e
            })?;

        log_op_end!(
            "reset_slots",
            duration_ms = start.elapsed().as_millis() as u64
        );

        Ok(MessageOutcome::deleted())
    }

    /// Report which slots are populated
    ///
    /// ## Errors
    ///
    /// - `Concurrency`: the slot lock is poisoned
    pub fn status(&self) -> Result<SlotStatus> {
        let slots = self.lock("slot_status")?;
        Ok(SlotStatus::new(
            slots.exists(SlotNumber::One),
            slots.exists(SlotNumber::Two),
        ))
    }

    fn lock(&self, op: &str) -> Result<MutexGuard<'_, S>> {
        self.slots.lock().map_err(|_| {
            ExError::new(ExErrorKind::Concurrency)
                .with_op(op)
                .with_message("Slot store lock was poisoned by a panicked operation")
        })
    }
}
