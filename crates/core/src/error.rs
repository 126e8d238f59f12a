//! Core Error Types
//!
//! Error types shared by the pure crates of the Bible Crentech workspace.
//! Only thiserror + std, so the core crate stays free of I/O dependencies.
//!
//! Parsing a query never produces one of these: "no reference" is an
//! `Option::None`, not an error. These cover catalog construction and the
//! few validating constructors.

use thiserror::Error;

/// Core error type for the Bible Crentech workspace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Validation errors (malformed catalog data, invalid reference ranges)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

/// Convert CoreError to a string
impl From<CoreError> for String {
    fn from(err: CoreError) -> String {
        err.to_string()
    }
}
