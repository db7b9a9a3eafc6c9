//! Lifecycle logging macros
//!
//! All three expand to one `tracing` event carrying `component`, `op` and
//! `event`, plus whatever extra `key = value` fields the caller passes.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_lifecycle {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use jsoncmp_core::log_op_start;
/// log_op_start!("reset_slots");
/// log_op_start!("store_payload", slot_number = 1, payload_bytes = 17usize);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_lifecycle!(
            info,
            $op,
            $crate::core_types::schema::EVENT_START
            $(, $($field)*)?
        )
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use jsoncmp_core::log_op_end;
/// log_op_end!("compare_stored", duration_ms = 3, diff_count = 2usize);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_lifecycle!(
            info,
            $op,
            $crate::core_types::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Log the failed end of an operation
///
/// `$err` is anything convertible into `ExError`. Client errors (validation,
/// readiness) are logged at `warn`; everything else at `error` together with
/// the full error text.
///
/// # Example
///
/// ```
/// # use jsoncmp_core::{log_op_error, errors::CompareError};
/// log_op_error!("compare_stored", CompareError::NotReady, duration_ms = 0);
/// log_op_error!(
///     "store_payload",
///     CompareError::InvalidSlotNumber { slot_number: 5 },
///     duration_ms = 0,
///     slot_number = 5
/// );
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        if ex_err.kind().is_client_error() {
            $crate::__log_lifecycle!(
                warn,
                $op,
                $crate::core_types::schema::EVENT_END_ERROR,
                duration_ms = $duration,
                err_kind = ?ex_err.kind(),
                err_code = ex_err.code()
                $(, $($field)*)?
            );
        } else {
            $crate::__log_lifecycle!(
                error,
                $op,
                $crate::core_types::schema::EVENT_END_ERROR,
                duration_ms = $duration,
                err_kind = ?ex_err.kind(),
                err_code = ex_err.code(),
                error = %ex_err
                $(, $($field)*)?
            );
        }
    }};
}
