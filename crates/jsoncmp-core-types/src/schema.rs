//! Names of the structured fields and lifecycle events in jsoncmp logs
//!
//! `tracing` macros take literal field names, so `log_op_*` spell these out.
//! The constants are for whoever reads the output back: the test capture
//! layer, tests, and log queries.

// Lifecycle events emitted by log_op_start! / log_op_end! / log_op_error!
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// On every lifecycle event
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";

// On end and end_error
pub const FIELD_DURATION_MS: &str = "duration_ms";

// On end_error
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// On the HTTP request span
pub const FIELD_REQUEST_ID: &str = "request_id";

// Operation specific
pub const FIELD_SLOT_NUMBER: &str = "slot_number";
pub const FIELD_PAYLOAD_BYTES: &str = "payload_bytes";
pub const FIELD_DIFF_COUNT: &str = "diff_count";
