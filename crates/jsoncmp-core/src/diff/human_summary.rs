//! Human-readable summary renderer for difference lists.

use crate::diff::model::{Difference, DifferenceKind};
use serde_json::Value;

/// Render a plain-text summary of a difference list.
///
/// Informational only; the structured list remains the source of truth.
pub fn render_human_summary(diffs: &[Difference]) -> String {
    if diffs.is_empty() {
        return "No differences found\n".to_string();
    }

    let mut out = format!("{} difference(s) found\n\n", diffs.len());
    for d in diffs {
        let path = if d.path.is_empty() { "(root)" } else { &d.path };
        let line = match &d.kind {
            DifferenceKind::MissingInSecond { value } => {
                format!("- {path}: missing in second (first has {})\n", inline(value))
            }
            DifferenceKind::MissingInFirst { value } => {
                format!("- {path}: missing in first (second has {})\n", inline(value))
            }
            DifferenceKind::ValueMismatch { value1, value2 } => {
                format!(
                    "- {path}: value mismatch {} -> {}\n",
                    inline(value1),
                    inline(value2)
                )
            }
        };
        out.push_str(&line);
    }
    out
}

fn inline(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "<unprintable>".to_string())
}
