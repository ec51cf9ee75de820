//! User Service - operational CLI for the account core.

use clap::{Parser, Subcommand};

use common::telemetry::init_tracing;
use user_service_lib::{config::UserServiceConfig, service::SetPassword, MigrateAction};

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User account and authentication service")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Validate configuration and check database and event bus connectivity
    Check,
    /// Overwrite a user's password without the old one
    SetPassword {
        /// Account to update
        #[arg(short, long)]
        username: String,

        /// New password
        #[arg(long, env = "USER_SERVICE_NEW_PASSWORD", hide_env_values = true)]
        password: String,

        /// New password, repeated
        #[arg(long, env = "USER_SERVICE_CONFIRM_PASSWORD", hide_env_values = true)]
        confirm_password: String,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_tracing("info", cli.verbose);

    let config = UserServiceConfig::from_env();
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            user_service_lib::run_migrations(&config, migrate_action).await?;
        }
        Commands::Check => {
            user_service_lib::run_check(&config).await?;
        }
        Commands::SetPassword {
            username,
            password,
            confirm_password,
        } => {
            user_service_lib::run_set_password(
                &config,
                SetPassword {
                    username,
                    password,
                    confirm_password,
                },
            )
            .await?;
        }
    }

    Ok(())
}
