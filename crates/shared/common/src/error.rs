//! Unified error handling.
//!
//! One error type for every use case. Business faults are meant to reach the
//! caller as-is; infrastructure faults end the current request.

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Business rule faults
    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("User doesn't exist")]
    NotFound,

    #[error("Missing id")]
    MissingIdentifier,

    #[error("Passwords are not equal")]
    PasswordMismatch,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password does not satisfy policy: {0}")]
    PolicyViolation(String),

    // Store returned something a unique key can't produce
    #[error("Data integrity fault: {0}")]
    DataIntegrity(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[cfg(feature = "jwt")]
    #[error("Token error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[cfg(feature = "events")]
    #[error("Event bus error")]
    EventBus(#[from] redis::RedisError),

    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::AlreadyExists(_) => "ALREADY_EXISTS",
            AppError::NotFound => "NOT_FOUND",
            AppError::MissingIdentifier => "MISSING_IDENTIFIER",
            AppError::PasswordMismatch => "PASSWORD_MISMATCH",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::PolicyViolation(_) => "POLICY_VIOLATION",
            AppError::DataIntegrity(_) => "DATA_INTEGRITY",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => "TOKEN_ERROR",
            #[cfg(feature = "events")]
            AppError::EventBus(_) => "EVENT_BUS_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller can recover (e.g. re-prompt the user).
    pub fn is_business_fault(&self) -> bool {
        matches!(
            self,
            AppError::AlreadyExists(_)
                | AppError::NotFound
                | AppError::MissingIdentifier
                | AppError::PasswordMismatch
                | AppError::InvalidCredentials
                | AppError::PolicyViolation(_)
        )
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        if self.is_business_fault() {
            return self.to_string();
        }

        match self {
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            #[cfg(feature = "jwt")]
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            #[cfg(feature = "events")]
            AppError::EventBus(e) => {
                tracing::error!("Event bus error: {:?}", e);
                "An event bus error occurred".to_string()
            }
            other => {
                tracing::error!("Internal error: {}", other);
                "An internal error occurred".to_string()
            }
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Password(msg) => AppError::Internal(msg),
            e @ DomainError::UnknownRole(_) => AppError::DataIntegrity(e.to_string()),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn already_exists(entity: impl Into<String>) -> Self {
        AppError::AlreadyExists(entity.into())
    }

    pub fn policy(msg: impl Into<String>) -> Self {
        AppError::PolicyViolation(msg.into())
    }

    pub fn data_integrity(msg: impl Into<String>) -> Self {
        AppError::DataIntegrity(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
