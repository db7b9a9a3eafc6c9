//! jsoncmp store - durable slot storage on the local filesystem
//!
//! Provides:
//! - [`FsSlotStore`], a `SlotStore` keeping each slot as `payload_{n}.json`
//! - Atomic single-slot writes (temp→rename)
//! - All-or-nothing multi-slot clear with crash recovery

pub mod errors;
pub mod slots;

// Re-export key types
pub use errors::Result;
pub use slots::FsSlotStore;
