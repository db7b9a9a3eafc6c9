//! jsoncmp core - slot storage, structural diff, error and logging facilities
//!
//! This crate provides:
//! - The [`SlotStore`] abstraction and an in-memory implementation
//! - Payload parsing ([`parse_payload`]) and the structural JSON differ
//!   producing path-annotated [`Difference`] records
//! - The canonical error facility ([`ExError`], [`ExErrorKind`], [`CompareError`])
//! - The structured logging facility and its `log_op_*` macros

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod payload;
pub mod slots;

/// Re-exported for the logging macros
pub use jsoncmp_core_types as core_types;

// Re-export commonly used types
pub use diff::{diff_values, Difference, DifferenceKind};
pub use errors::{CompareError, ExError, ExErrorKind, Result};
pub use payload::parse_payload;
pub use slots::{MemorySlotStore, SlotNumber, SlotStore};
