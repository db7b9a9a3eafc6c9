//! Redacting wrapper for caller payloads
//!
//! Submitted payloads are caller data of unknown content. Keeping the raw
//! text inside `Sensitive<T>` means a stray `?request` in a log line prints a
//! placeholder instead of the document.

use std::fmt;

/// Placeholder written by both `Debug` and `Display`
pub const REDACTED: &str = "<redacted>";

/// # Example
///
/// ```
/// use jsoncmp_core_types::Sensitive;
///
/// let payload = Sensitive::new(r#"{"token":"abc"}"#.to_string());
/// assert_eq!(format!("{:?}", payload), "<redacted>");
/// assert_eq!(payload.byte_len(), 15);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the wrapped value; only the parsing step should need this
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: AsRef<str>> Sensitive<T> {
    /// Size of the wrapped text in bytes, which is safe to log
    pub fn byte_len(&self) -> usize {
        self.0.as_ref().len()
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}
