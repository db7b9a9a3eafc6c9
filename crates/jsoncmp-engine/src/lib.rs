//! jsoncmp engine - comparison orchestration
//!
//! Coordinates validation, slot storage and the structural differ behind a
//! single lock so that every call observes and leaves a consistent slot pair.

pub mod backend;
pub mod comparator;
pub mod outcome;

pub use backend::{open_slot_store, SlotBackend};
pub use comparator::Comparator;
pub use outcome::{CompareReport, MessageOutcome, SlotStatus};
