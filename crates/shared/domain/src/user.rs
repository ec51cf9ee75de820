//! User aggregate and related value objects.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{ROLE_ADMIN, ROLE_USER};
use crate::error::{DomainError, DomainResult};
use crate::events::{AddressSnapshot, UserChanged};
use crate::password::Password;

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl TryFrom<&str> for UserRole {
    type Error = DomainError;

    /// Parse a stored role tag. Tags are exact and case sensitive.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            ROLE_ADMIN => Ok(UserRole::Admin),
            ROLE_USER => Ok(UserRole::User),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::User => write!(f, "{}", ROLE_USER),
        }
    }
}

/// Postal address. Replaced as a whole, never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub postal_code: String,
    pub street: String,
}

impl Address {
    pub fn new(
        city: impl Into<String>,
        postal_code: impl Into<String>,
        street: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            postal_code: postal_code.into(),
            street: street.into(),
        }
    }
}

/// The mutable profile fields of a user, replaced together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub email: String,
    pub first_name: String,
    pub second_name: String,
    pub birth_date: NaiveDate,
    pub address: Address,
}

/// User aggregate.
///
/// Fields are private so every mutation goes through a method that keeps
/// `modified_at` moving forward. The password hash is only reachable through
/// [`User::verify_password`] and, for storage, [`User::password`].
#[derive(Debug, Clone)]
pub struct User {
    id: Uuid,
    username: String,
    profile: Profile,
    roles: BTreeSet<UserRole>,
    modified_at: DateTime<Utc>,
    password: Password,
}

impl User {
    /// Factory for a freshly registered account.
    ///
    /// Assigns a new id and the default role set. The password hash is empty
    /// until [`User::set_password`] runs, and an empty hash never verifies.
    pub fn register(username: impl Into<String>, profile: Profile) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            profile,
            roles: BTreeSet::from([UserRole::User]),
            modified_at: now_micros(),
            password: Password::from_hash(String::new()),
        }
    }

    /// Rehydrate an aggregate from storage. No timestamps are touched.
    pub fn restore(
        id: Uuid,
        username: String,
        profile: Profile,
        roles: BTreeSet<UserRole>,
        modified_at: DateTime<Utc>,
        password: Password,
    ) -> Self {
        Self {
            id,
            username,
            profile,
            roles,
            modified_at,
            password,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn email(&self) -> &str {
        &self.profile.email
    }

    pub fn first_name(&self) -> &str {
        &self.profile.first_name
    }

    pub fn second_name(&self) -> &str {
        &self.profile.second_name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.profile.birth_date
    }

    pub fn address(&self) -> &Address {
        &self.profile.address
    }

    pub fn roles(&self) -> &BTreeSet<UserRole> {
        &self.roles
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    /// Stored hash, for persistence adapters only.
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&UserRole::Admin)
    }

    /// Hash `plain_text` and replace the stored hash.
    ///
    /// This is a raw hash-and-store step: policy membership is the caller's
    /// concern.
    pub fn set_password(&mut self, plain_text: &str) -> DomainResult<()> {
        self.password = Password::hash(plain_text)?;
        self.touch();
        Ok(())
    }

    /// One-way credential check against the stored hash.
    pub fn verify_password(&self, plain_text: &str) -> bool {
        self.password.verify(plain_text)
    }

    /// Replace email, names, birth date and address in one step.
    pub fn update_profile(&mut self, profile: Profile) {
        self.profile = profile;
        self.touch();
    }

    /// Snapshot of the current state as a `UserChanged` event.
    pub fn changed_event(&self) -> UserChanged {
        let address = self.address();
        UserChanged {
            id: self.id,
            username: self.username.clone(),
            email: self.profile.email.clone(),
            roles: self.roles.iter().map(ToString::to_string).collect(),
            first_name: self.profile.first_name.clone(),
            second_name: self.profile.second_name.clone(),
            birth_date: self.profile.birth_date,
            modified_at: self.modified_at,
            address: AddressSnapshot {
                city: address.city.clone(),
                postal_code: address.postal_code.clone(),
                street: address.street.clone(),
            },
        }
    }

    // Storage keeps microseconds, so that is the smallest forward step.
    fn touch(&mut self) {
        let now = now_micros();
        self.modified_at = if now > self.modified_at {
            now
        } else {
            (self.modified_at + Duration::microseconds(1)).trunc_subsecs(MICROS)
        };
    }
}

const MICROS: u16 = 6;

/// Current time at the precision the store keeps.
fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(MICROS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            second_name: "Doe".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            address: Address::new("Gdansk", "80-001", "Długa 1"),
        }
    }

    #[test]
    fn test_register_assigns_default_role() {
        let user = User::register("jane", profile());

        assert_eq!(user.username(), "jane");
        assert_eq!(user.roles().len(), 1);
        assert!(user.roles().contains(&UserRole::User));
        assert!(!user.is_admin());
    }

    #[test]
    fn test_unset_password_never_verifies() {
        let user = User::register("jane", profile());
        assert!(!user.verify_password(""));
        assert!(!user.verify_password("Abcdefg1"));
    }

    #[test]
    fn test_set_password_hashes_and_verifies() {
        let mut user = User::register("jane", profile());
        let before = user.modified_at();

        user.set_password("Abcdefg1").unwrap();

        assert!(user.verify_password("Abcdefg1"));
        assert!(!user.verify_password("Abcdefg2"));
        assert_ne!(user.password().as_str(), "Abcdefg1");
        assert!(user.modified_at() > before);
    }

    #[test]
    fn test_set_password_skips_policy() {
        let mut user = User::register("jane", profile());
        user.set_password("x").unwrap();
        assert!(user.verify_password("x"));
    }

    #[test]
    fn test_update_profile_replaces_all_fields() {
        let mut user = User::register("jane", profile());
        let before = user.modified_at();
        let roles = user.roles().clone();

        let updated = Profile {
            email: "j.doe@example.com".to_string(),
            first_name: "Janet".to_string(),
            second_name: "Smith".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1991, 1, 2).unwrap(),
            address: Address::new("Sopot", "81-701", "Monte Cassino 5"),
        };
        user.update_profile(updated.clone());

        assert_eq!(user.profile(), &updated);
        assert_eq!(user.username(), "jane");
        assert_eq!(user.roles(), &roles);
        assert!(user.modified_at() > before);
    }

    #[test]
    fn test_modified_at_strictly_increases_even_with_future_timestamp() {
        let future = Utc::now() + Duration::hours(1);
        let mut user = User::restore(
            Uuid::new_v4(),
            "jane".to_string(),
            profile(),
            BTreeSet::from([UserRole::User]),
            future,
            Password::from_hash(String::new()),
        );

        user.update_profile(profile());

        assert_eq!(
            user.modified_at(),
            (future + Duration::microseconds(1)).trunc_subsecs(6)
        );
        assert!(user.modified_at() > future);
    }

    #[test]
    fn test_timestamps_keep_microsecond_precision() {
        let mut user = User::register("jane", profile());
        assert_eq!(user.modified_at().timestamp_subsec_nanos() % 1_000, 0);

        user.update_profile(profile());
        assert_eq!(user.modified_at().timestamp_subsec_nanos() % 1_000, 0);
        assert_eq!(user.changed_event().modified_at, user.modified_at());
    }

    #[test]
    fn test_changed_event_uses_postal_code() {
        let user = User::register("jane", profile());
        let event = user.changed_event();

        assert_eq!(event.id, user.id());
        assert_eq!(event.address.city, "Gdansk");
        assert_eq!(event.address.postal_code, "80-001");
        assert_eq!(event.address.street, "Długa 1");
        assert_eq!(event.roles, vec!["user".to_string()]);
        assert_eq!(event.modified_at, user.modified_at());
    }

    #[test]
    fn test_role_parse_is_exact() {
        assert_eq!(UserRole::try_from("admin"), Ok(UserRole::Admin));
        assert_eq!(UserRole::try_from("user"), Ok(UserRole::User));
        assert_eq!(
            UserRole::try_from("Admin"),
            Err(DomainError::UnknownRole("Admin".to_string()))
        );
        assert!(UserRole::try_from("moderator").is_err());
        assert_eq!(String::from(UserRole::Admin), "admin");
    }
}
