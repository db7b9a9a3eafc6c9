use crate::slots::SlotNumber;
use jsoncmp_core_types::RequestId;
use thiserror::Error;

/// Result type alias using the canonical structured error
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// tests, and the HTTP boundary's status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    InvalidSlot,
    MalformedPayload,
    MissingField,

    // Slot lifecycle
    SlotEmpty,
    NotReady,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    Concurrency,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidSlot => "ERR_INVALID_SLOT",
            ExErrorKind::MalformedPayload => "ERR_MALFORMED_PAYLOAD",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::SlotEmpty => "ERR_SLOT_EMPTY",
            ExErrorKind::NotReady => "ERR_NOT_READY",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True when the caller caused the failure and can fix it by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidInput
                | ExErrorKind::InvalidSlot
                | ExErrorKind::MalformedPayload
                | ExErrorKind::MissingField
                | ExErrorKind::SlotEmpty
                | ExErrorKind::NotReady
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional context. `message` is the
/// human-facing text returned verbatim at the service boundary.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    slot: Option<SlotNumber>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            slot: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add slot context
    pub fn with_slot(mut self, slot: SlotNumber) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn slot(&self) -> Option<SlotNumber> {
        self.slot
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(slot) = self.slot {
            write!(f, " (slot: {})", slot)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for slot storage and comparison
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    // ===== Validation Errors =====
    /// Slot number outside {1, 2}
    #[error("The slot number must be 1 or 2, got {slot_number}")]
    InvalidSlotNumber { slot_number: i64 },

    /// Payload text is not parseable JSON
    #[error("The payload must be a valid JSON string: {reason}")]
    MalformedPayload { reason: String },

    /// Required request field absent
    #[error("The {field} field is required")]
    MissingField { field: String },

    /// Request body unreadable or a field has the wrong type
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    // ===== Slot Lifecycle Errors =====
    /// Read of a slot that holds nothing
    #[error("Payload {slot} has not been stored")]
    SlotEmpty { slot: SlotNumber },

    /// Compare requested while at least one slot is empty
    #[error("Both payloads must be stored before comparison")]
    NotReady,

    // ===== Storage Errors =====
    /// Backing store I/O failure
    #[error("Storage failure during {op}: {message}")]
    Storage { op: String, message: String },

    /// A stored payload could not be encoded or decoded
    #[error("Serialization error during {op}: {message}")]
    Serialization { op: String, message: String },

    /// A multi-slot clear failed and every slot was put back
    #[error("Clearing payloads failed and was rolled back: {reason}")]
    ClearRolledBack { reason: String },

    /// A multi-slot clear failed and at least one slot could not be put back
    ///
    /// The slot pair stays inconsistent until the store recovers it.
    #[error("Clearing payloads failed and could not be fully rolled back: {reason}")]
    ClearIncomplete { reason: String },
}

/// Conversion from CompareError to ExError
impl From<CompareError> for ExError {
    fn from(err: CompareError) -> Self {
        let message = err.to_string();
        match err {
            CompareError::InvalidSlotNumber { .. } => ExError::new(ExErrorKind::InvalidSlot)
                .with_op("validate_slot")
                .with_message(message),

            CompareError::MalformedPayload { .. } => {
                ExError::new(ExErrorKind::MalformedPayload)
                    .with_op("parse_payload")
                    .with_message(message)
            }

            CompareError::MissingField { .. } => {
                ExError::new(ExErrorKind::MissingField).with_message(message)
            }

            CompareError::InvalidRequest { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }

            CompareError::SlotEmpty { slot } => ExError::new(ExErrorKind::SlotEmpty)
                .with_slot(slot)
                .with_message(message),

            CompareError::NotReady => ExError::new(ExErrorKind::NotReady).with_message(message),

            CompareError::Storage { op, .. } => {
                ExError::new(ExErrorKind::Io).with_op(op).with_message(message)
            }

            CompareError::Serialization { op, .. } => ExError::new(ExErrorKind::Serialization)
                .with_op(op)
                .with_message(message),

            CompareError::ClearRolledBack { .. } | CompareError::ClearIncomplete { .. } => {
                ExError::new(ExErrorKind::Persistence)
                    .with_op("slot_clear")
                    .with_message(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::InvalidSlot, "ERR_INVALID_SLOT"),
            (ExErrorKind::MalformedPayload, "ERR_MALFORMED_PAYLOAD"),
            (ExErrorKind::MissingField, "ERR_MISSING_FIELD"),
            (ExErrorKind::SlotEmpty, "ERR_SLOT_EMPTY"),
            (ExErrorKind::NotReady, "ERR_NOT_READY"),
            (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
            (ExErrorKind::Concurrency, "ERR_CONCURRENCY"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ExErrorKind::InvalidSlot.is_client_error());
        assert!(ExErrorKind::NotReady.is_client_error());
        assert!(!ExErrorKind::Persistence.is_client_error());
        assert!(!ExErrorKind::Concurrency.is_client_error());
        assert!(!ExErrorKind::Internal.is_client_error());
    }

    #[test]
    fn test_not_ready_message_is_verbatim() {
        let err: ExError = CompareError::NotReady.into();
        assert_eq!(err.kind(), ExErrorKind::NotReady);
        assert_eq!(
            err.message(),
            "Both payloads must be stored before comparison"
        );
    }

    #[test]
    fn test_slot_empty_carries_slot() {
        let err: ExError = CompareError::SlotEmpty {
            slot: SlotNumber::Two,
        }
        .into();
        assert_eq!(err.slot(), Some(SlotNumber::Two));
        assert_eq!(err.message(), "Payload 2 has not been stored");
    }

    #[test]
    fn test_storage_error_keeps_op() {
        let err: ExError = CompareError::Storage {
            op: "slot_write".to_string(),
            message: "permission denied".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::Io);
        assert_eq!(err.op(), Some("slot_write"));
        assert!(err.to_string().contains("ERR_IO"));
    }

    #[test]
    fn test_clear_failures_are_persistence_errors() {
        let rolled_back: ExError = CompareError::ClearRolledBack {
            reason: "busy".to_string(),
        }
        .into();
        let incomplete: ExError = CompareError::ClearIncomplete {
            reason: "busy".to_string(),
        }
        .into();

        assert_eq!(rolled_back.kind(), ExErrorKind::Persistence);
        assert_eq!(incomplete.kind(), ExErrorKind::Persistence);
        assert_eq!(incomplete.op(), Some("slot_clear"));
        assert!(rolled_back.message().contains("was rolled back"));
        assert!(incomplete.message().contains("could not be fully rolled back"));
    }

    #[test]
    fn test_display_includes_request_id() {
        let err = ExError::new(ExErrorKind::Internal)
            .with_message("boom")
            .with_request_id(RequestId::from_inbound("req-1").unwrap());
        assert_eq!(err.to_string(), "[ERR_INTERNAL]: boom (request_id: req-1)");
    }
}
