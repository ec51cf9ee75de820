//! User Service Library
//!
//! Account lifecycle and authentication core: registration, profile updates,
//! removal, password management and sign-in. Use cases live in [`service`];
//! storage and the event bus are reached through the [`repository`] and
//! [`events`] traits.

pub mod config;
pub mod events;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use common::{AppResult, EventBusConfig};
use domain::MinimalPasswordPolicy;

use crate::config::UserServiceConfig;
use crate::events::{EventPublisher, LogPublisher, RedisPublisher};
use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::{SetPassword, TokenIssuer, UserManager, UserService};

/// Pick the event publisher for the configured bus.
pub async fn connect_publisher(config: &EventBusConfig) -> AppResult<Arc<dyn EventPublisher>> {
    match &config.url {
        Some(url) => Ok(Arc::new(RedisPublisher::connect(url, config.channel.clone()).await?)),
        None => {
            tracing::warn!("No event bus configured; user events will only be logged");
            Ok(Arc::new(LogPublisher))
        }
    }
}

/// Build the user service with its production collaborators.
///
/// The token issuer is built first so a missing signing secret fails before
/// any connection is opened.
pub async fn build_service(
    config: &UserServiceConfig,
) -> Result<UserManager, Box<dyn std::error::Error>> {
    let tokens = TokenIssuer::from_config(&config.jwt)?;

    let db = Database::connect(&config.database).await?;
    let repo = Arc::new(UserStore::new(db.get_connection()));
    let publisher = connect_publisher(&config.events).await?;

    info!("User service ready");

    Ok(UserManager::new(
        repo,
        publisher,
        Arc::new(MinimalPasswordPolicy::new()),
        tokens,
    ))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &UserServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                let marker = if applied { "[x]" } else { "[ ]" };
                info!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Validate configuration and reach every collaborator once.
pub async fn run_check(config: &UserServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    TokenIssuer::from_config(&config.jwt)?;
    info!("Signing key configured");

    let db = Database::connect_without_migrations(&config.database).await?;
    db.ping().await?;
    info!("Database reachable");

    match &config.events.url {
        Some(url) => {
            let publisher = RedisPublisher::connect(url, config.events.channel.clone()).await?;
            publisher.ping().await?;
            info!(channel = %publisher.channel(), "Event bus reachable");
        }
        None => info!("No event bus configured; events go to the log"),
    }

    Ok(())
}

/// Overwrite a password through the full service (for CLI commands).
pub async fn run_set_password(
    config: &UserServiceConfig,
    request: SetPassword,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = build_service(config).await?;
    let username = request.username.clone();

    service.set_password(request).await?;
    info!(username = %username, "Password set");

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
