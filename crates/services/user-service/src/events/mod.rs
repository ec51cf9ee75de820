//! Event publishing.
//!
//! Publishing is fire-and-forget: a successful call means the bus accepted
//! the payload, nothing more.

mod redis_publisher;

use async_trait::async_trait;

use common::AppResult;
use domain::UserEvent;

pub use redis_publisher::RedisPublisher;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Publish capability for user domain events.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Hand an event to the bus
    async fn publish(&self, event: &UserEvent) -> AppResult<()>;
}

/// Writes events to the log instead of a bus.
///
/// Used when no event bus URL is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPublisher;

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn publish(&self, event: &UserEvent) -> AppResult<()> {
        let payload = serde_json::to_string(event)?;
        tracing::info!(
            event = event.name(),
            user_id = %event.user_id(),
            payload = %payload,
            "User event published to log"
        );
        Ok(())
    }
}
