//! Request correlation
//!
//! A `RequestId` is either taken from the caller's `x-request-id` header or
//! minted at the HTTP boundary. It tags the request span and any error
//! produced while serving the request.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Longest caller-supplied id that is reused as-is
pub const MAX_INBOUND_REQUEST_ID_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Fresh time-ordered id (UUIDv7)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Accept a caller-supplied id
    ///
    /// Returns `None` when the value is empty, longer than
    /// [`MAX_INBOUND_REQUEST_ID_LEN`], or contains anything other than
    /// visible ASCII. Callers fall back to [`RequestId::new`].
    pub fn from_inbound(value: &str) -> Option<Self> {
        let usable = !value.is_empty()
            && value.len() <= MAX_INBOUND_REQUEST_ID_LEN
            && value.bytes().all(|b| b.is_ascii_graphic());
        usable.then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
