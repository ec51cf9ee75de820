//! User service configuration.

use std::env;

use common::{DatabaseConfig, EventBusConfig, JwtConfig};
use domain::DEFAULT_EVENTS_CHANNEL;

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub events: EventBusConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables (and `.env`, if present).
    ///
    /// A missing `JWT_SECRET` is not rejected here; the token issuer refuses
    /// to start without one.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = DatabaseConfig::default();

        Self {
            database: DatabaseConfig {
                url: env::var("USER_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.url),
                max_connections: env::var("USER_SERVICE_DB_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.max_connections),
                min_connections: env::var("USER_SERVICE_DB_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.min_connections),
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET")
                    .or_else(|_| env::var("USER_SERVICE_JWT_SECRET"))
                    .unwrap_or_default(),
            },
            events: EventBusConfig {
                url: env::var("USER_SERVICE_REDIS_URL")
                    .or_else(|_| env::var("REDIS_URL"))
                    .ok()
                    .filter(|url| !url.is_empty()),
                channel: env::var("USER_EVENTS_CHANNEL")
                    .unwrap_or_else(|_| DEFAULT_EVENTS_CHANNEL.to_string()),
            },
        }
    }
}
