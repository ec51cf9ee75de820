//! User domain events.
//!
//! Immutable notifications of completed state changes. They travel on a
//! single channel, so the envelope is a tagged enum.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Address as carried in event payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSnapshot {
    pub city: String,
    pub postal_code: String,
    pub street: String,
}

/// A user was created or its profile changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserChanged {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    pub first_name: String,
    pub second_name: String,
    pub birth_date: NaiveDate,
    pub modified_at: DateTime<Utc>,
    pub address: AddressSnapshot,
}

/// A user was deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRemoved {
    pub id: Uuid,
}

/// Envelope for everything published about users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserEvent {
    UserChanged(UserChanged),
    UserRemoved(UserRemoved),
}

impl UserEvent {
    /// Stable name of the event kind
    pub fn name(&self) -> &'static str {
        match self {
            UserEvent::UserChanged(_) => "user_changed",
            UserEvent::UserRemoved(_) => "user_removed",
        }
    }

    /// Id of the user the event is about
    pub fn user_id(&self) -> Uuid {
        match self {
            UserEvent::UserChanged(e) => e.id,
            UserEvent::UserRemoved(e) => e.id,
        }
    }
}

impl From<UserChanged> for UserEvent {
    fn from(event: UserChanged) -> Self {
        UserEvent::UserChanged(event)
    }
}

impl From<UserRemoved> for UserEvent {
    fn from(event: UserRemoved) -> Self {
        UserEvent::UserRemoved(event)
    }
}
