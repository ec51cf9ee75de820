//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user aggregate, password hashing, password policies and the events
//! published when users change.

pub mod constants;
pub mod error;
pub mod events;
pub mod password;
pub mod policy;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use events::{AddressSnapshot, UserChanged, UserEvent, UserRemoved};
pub use password::Password;
pub use policy::{MinimalPasswordPolicy, PasswordPolicy};
pub use user::{Address, Profile, User, UserRole};
