//! Error handling for jsoncmp-store
//!
//! Every failure is classified through `CompareError` so the store reports
//! the same taxonomy as the rest of the service. Slot context is attached
//! afterwards on the canonical `ExError`.

use jsoncmp_core::errors::{CompareError, ExError};
use jsoncmp_core::SlotNumber;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    CompareError::Storage {
        op: operation.to_string(),
        message: err.to_string(),
    }
    .into()
}

/// Create an IO error tied to one slot
pub fn slot_io_error(operation: &str, slot: SlotNumber, err: std::io::Error) -> ExError {
    io_error(operation, err).with_slot(slot)
}

/// Create an error for a slot file that no longer decodes as JSON
pub fn corrupt_slot(slot: SlotNumber, err: serde_json::Error) -> ExError {
    ExError::from(CompareError::Serialization {
        op: "slot_read".to_string(),
        message: format!("stored payload {} is not valid JSON: {}", slot, err),
    })
    .with_slot(slot)
}

/// Create an error for a value that cannot be encoded for storage
pub fn encode_error(slot: SlotNumber, err: serde_json::Error) -> ExError {
    ExError::from(CompareError::Serialization {
        op: "slot_write".to_string(),
        message: err.to_string(),
    })
    .with_slot(slot)
}

/// Create an error for a clear whose staged slots were all put back
pub fn clear_rolled_back(cause: &ExError) -> ExError {
    CompareError::ClearRolledBack {
        reason: cause.to_string(),
    }
    .into()
}

/// Create an error for a clear that left a slot staged
pub fn clear_incomplete(cause: &ExError) -> ExError {
    CompareError::ClearIncomplete {
        reason: cause.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsoncmp_core::errors::ExErrorKind;

    #[test]
    fn test_slot_io_error_carries_slot_and_op() {
        let err = slot_io_error(
            "slot_write",
            SlotNumber::Two,
            std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        );
        assert_eq!(err.kind(), ExErrorKind::Io);
        assert_eq!(err.op(), Some("slot_write"));
        assert_eq!(err.slot(), Some(SlotNumber::Two));
        assert_eq!(err.message(), "Storage failure during slot_write: disk full");
    }

    #[test]
    fn test_corrupt_slot_is_serialization_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = corrupt_slot(SlotNumber::One, serde_err);

        assert_eq!(err.kind(), ExErrorKind::Serialization);
        assert_eq!(err.op(), Some("slot_read"));
        assert_eq!(err.slot(), Some(SlotNumber::One));
    }

    #[test]
    fn test_clear_errors_name_the_outcome() {
        let cause = io_error(
            "stage_slot",
            std::io::Error::new(std::io::ErrorKind::Other, "busy"),
        );

        let rolled_back = clear_rolled_back(&cause);
        let incomplete = clear_incomplete(&cause);

        assert_eq!(rolled_back.kind(), ExErrorKind::Persistence);
        assert!(rolled_back.message().contains("was rolled back"));
        assert!(rolled_back.message().contains("busy"));
        assert_eq!(incomplete.kind(), ExErrorKind::Persistence);
        assert!(incomplete.message().contains("could not be fully rolled back"));
        assert!(!incomplete.kind().is_client_error());
    }
}
