//! Domain-level errors.
//!
//! These errors represent failures inside the domain model. They are
//! independent of infrastructure concerns (database, event bus).

use thiserror::Error;

/// Domain-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Hashing or hash parsing failed
    #[error("Password error: {0}")]
    Password(String),

    /// A stored role tag that no `UserRole` corresponds to
    #[error("Unknown role: '{0}'")]
    UnknownRole(String),
}

impl DomainError {
    /// Create a password error
    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
