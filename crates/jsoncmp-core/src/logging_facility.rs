//! Structured logging for jsoncmp
//!
//! Binaries call [`init`] once with a [`Profile`]. Operations bracket their
//! work with the `log_op_*` macros so every call produces one `start` event
//! and exactly one `end` or `end_error` event:
//!
//! ```rust
//! use jsoncmp_core::{log_op_end, log_op_start};
//!
//! log_op_start!("compare_stored");
//! let started = std::time::Instant::now();
//! // ...
//! log_op_end!("compare_stored", duration_ms = started.elapsed().as_millis() as u64);
//! ```
//!
//! The orchestrator owns these lifecycle events. Slot backends only emit
//! `tracing::debug!` for internal detail. Tests read events back through
//! [`init_test_capture`].

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
