//! Redis pub/sub event publisher.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};

use super::EventPublisher;
use common::AppResult;
use domain::UserEvent;

/// Publishes JSON-encoded events on a single Redis channel.
#[derive(Clone)]
pub struct RedisPublisher {
    connection: ConnectionManager,
    channel: String,
}

impl RedisPublisher {
    /// Connect to Redis.
    pub async fn connect(url: &str, channel: impl Into<String>) -> AppResult<Self> {
        let client = Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis event bus connected");

        Ok(Self {
            connection,
            channel: channel.into(),
        })
    }

    /// Channel events are published on
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Check bus connectivity.
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

#[async_trait]
impl EventPublisher for RedisPublisher {
    async fn publish(&self, event: &UserEvent) -> AppResult<()> {
        let payload = serde_json::to_string(event)?;
        let mut conn = self.connection.clone();

        let receivers: i64 = conn.publish(&self.channel, payload).await?;

        tracing::debug!(
            event = event.name(),
            user_id = %event.user_id(),
            channel = %self.channel,
            receivers,
            "User event published"
        );
        Ok(())
    }
}
