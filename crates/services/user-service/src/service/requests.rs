//! Use case request and response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain::Profile;

/// Registration data for a new account
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    pub username: String,
    pub profile: Profile,
    pub password: String,
    pub confirm_password: String,
}

/// Profile replacement for an existing account
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfile {
    /// Target user; required
    pub id: Option<Uuid>,
    pub profile: Profile,
}

/// Password overwrite without the old password
#[derive(Debug, Clone, Deserialize)]
pub struct SetPassword {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Password change proven by the old password
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePassword {
    pub username: String,
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Credentials for sign-in
#[derive(Debug, Clone, Deserialize)]
pub struct SignIn {
    pub username: String,
    pub password: String,
}

/// Result of a successful sign-in
#[derive(Debug, Clone, Serialize)]
pub struct SignedInUser {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub id: Uuid,
    pub username: String,
    pub email: String,
}
