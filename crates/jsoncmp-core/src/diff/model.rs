//! Difference records.
//!
//! The serialized form is the wire shape returned by the compare endpoint:
//! `{ "path", "type", "value" }` for the `missing_*` kinds and
//! `{ "path", "type", "value1", "value2" }` for `value_mismatch`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single divergence between two JSON values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Difference {
    /// Dot-joined keys/indices from the root; empty for the root itself
    pub path: String,
    #[serde(flatten)]
    pub kind: DifferenceKind,
}

/// What diverged at a path, with the values involved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DifferenceKind {
    /// Key present in the first value only
    MissingInSecond { value: Value },
    /// Key present in the second value only
    MissingInFirst { value: Value },
    /// Key present in both with unequal values (scalars, or whole
    /// sub-structures when the container-ness disagrees)
    ValueMismatch { value1: Value, value2: Value },
}

impl Difference {
    pub fn missing_in_second(path: impl Into<String>, value: Value) -> Self {
        Self {
            path: path.into(),
            kind: DifferenceKind::MissingInSecond { value },
        }
    }

    pub fn missing_in_first(path: impl Into<String>, value: Value) -> Self {
        Self {
            path: path.into(),
            kind: DifferenceKind::MissingInFirst { value },
        }
    }

    pub fn value_mismatch(path: impl Into<String>, value1: Value, value2: Value) -> Self {
        Self {
            path: path.into(),
            kind: DifferenceKind::ValueMismatch { value1, value2 },
        }
    }

    /// Wire name of the kind (`missing_in_second`, ...)
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }
}

impl DifferenceKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            DifferenceKind::MissingInSecond { .. } => "missing_in_second",
            DifferenceKind::MissingInFirst { .. } => "missing_in_first",
            DifferenceKind::ValueMismatch { .. } => "value_mismatch",
        }
    }
}
