//! Structural JSON diff.
//!
//! Compares two JSON values key by key and produces an ordered list of
//! path-annotated [`Difference`] records.
//!
//! ## Entry point
//!
//! ```
//! use jsoncmp_core::diff::{diff_values, render_human_summary};
//! use serde_json::json;
//!
//! let diffs = diff_values(&json!({"a": {"b": 1}}), &json!({"a": {"b": 2}}));
//! assert_eq!(diffs[0].path, "a.b");
//! println!("{}", render_human_summary(&diffs));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: output order follows the key order of the inputs; keys
//!   of the first value are scanned before keys only present in the second.
//! - **Strict equality**: scalars never coerce (`"5"` vs `5`, `1` vs `1.0`).
//! - **Positional arrays**: arrays are keyed by index exactly like objects are
//!   keyed by name. Reordered elements show up as per-index mismatches.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::diff_values;
pub use human_summary::render_human_summary;
pub use model::{Difference, DifferenceKind};
