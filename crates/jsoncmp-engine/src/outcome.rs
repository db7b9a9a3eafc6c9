//! Results returned by the orchestrator
//!
//! These serialize directly into the HTTP response bodies.

use jsoncmp_core::{Difference, SlotNumber};
use serde::{Deserialize, Serialize};

pub const COMPARE_COMPLETED_MESSAGE: &str =
    "Comparison completed and payloads deleted successfully";
pub const PAYLOADS_DELETED_MESSAGE: &str = "Payloads deleted successfully";

/// A plain confirmation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageOutcome {
    pub message: String,
}

impl MessageOutcome {
    pub fn stored(slot: SlotNumber) -> Self {
        Self {
            message: format!("Payload {} stored successfully", slot),
        }
    }

    pub fn deleted() -> Self {
        Self {
            message: PAYLOADS_DELETED_MESSAGE.to_string(),
        }
    }
}

/// Outcome of a completed comparison
///
/// `differences` keeps the differ's order. An empty list still means the
/// comparison ran and both slots were cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareReport {
    pub differences: Vec<Difference>,
    pub message: String,
}

impl CompareReport {
    pub fn completed(differences: Vec<Difference>) -> Self {
        Self {
            differences,
            message: COMPARE_COMPLETED_MESSAGE.to_string(),
        }
    }
}

/// Which slots currently hold a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotStatus {
    pub slot1: bool,
    pub slot2: bool,
    pub ready: bool,
}

impl SlotStatus {
    pub fn new(slot1: bool, slot2: bool) -> Self {
        Self {
            slot1,
            slot2,
            ready: slot1 && slot2,
        }
    }
}
