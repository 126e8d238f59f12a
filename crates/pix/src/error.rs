//! PIX Error Types

use thiserror::Error;

/// Errors raised while building or inspecting a PIX payload.
///
/// Encoding itself never fails once a `PaymentPayload` exists; these come from
/// the validating constructors and from `verify`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PixError {
    /// A required field is empty or an amount is out of range
    #[error("Validation error: {0}")]
    Validation(String),

    /// The payload is not a well-formed TLV sequence
    #[error("Malformed payload: {0}")]
    Malformed(String),

    /// The trailing CRC does not match the payload contents
    #[error("Checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: String, found: String },
}

/// Result type alias for PIX errors
pub type PixResult<T> = Result<T, PixError>;

impl PixError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a malformed payload error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_mismatch_display() {
        let err = PixError::ChecksumMismatch {
            expected: "1D3D".to_string(),
            found: "0000".to_string(),
        };
        assert_eq!(err.to_string(), "Checksum mismatch: expected 1D3D, found 0000");
    }
}
