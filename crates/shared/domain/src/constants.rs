//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Password Policy
// =============================================================================

/// Minimum password length accepted by the minimal policy
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Authentication
// =============================================================================

/// Validity window of an issued sign-in token, in days
pub const TOKEN_VALIDITY_DAYS: i64 = 7;

/// Recommended minimum signing secret length (HMAC-SHA-256 block)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

// =============================================================================
// Events
// =============================================================================

/// Default bus channel carrying user domain events
pub const DEFAULT_EVENTS_CHANNEL: &str = "users.events";
