//! User service - account lifecycle and authentication use cases.
//!
//! Every use case runs load → validate → mutate → persist → notify, with at
//! most one read, one write and one publish, in that order. Publishing happens
//! after the write and is never compensated: if it fails the write stands and
//! the error still reaches the caller.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{PasswordPolicy, User, UserEvent, UserRemoved};

use super::requests::{
    ChangePassword, RegisterUser, SetPassword, SignIn, SignedInUser, UpdateProfile,
};
use super::token::TokenIssuer;
use crate::events::EventPublisher;
use crate::repository::{UserFilter, UserRepository};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create an account and announce it
    async fn register(&self, request: RegisterUser) -> AppResult<User>;

    /// Replace the profile fields of an account and announce the change
    async fn update_profile(&self, request: UpdateProfile) -> AppResult<User>;

    /// Hard-delete an account and announce the removal
    async fn remove(&self, id: Uuid) -> AppResult<()>;

    /// Overwrite a password without knowing the old one. Publishes nothing.
    async fn set_password(&self, request: SetPassword) -> AppResult<()>;

    /// Replace a password after verifying the old one. Publishes nothing.
    async fn change_password(&self, request: ChangePassword) -> AppResult<()>;

    /// Verify credentials and issue a token
    async fn sign_in(&self, request: SignIn) -> AppResult<SignedInUser>;

    /// Read a user by id
    async fn get_user(&self, id: Uuid) -> AppResult<User>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    publisher: Arc<dyn EventPublisher>,
    policy: Arc<dyn PasswordPolicy>,
    tokens: TokenIssuer,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(
        repo: Arc<dyn UserRepository>,
        publisher: Arc<dyn EventPublisher>,
        policy: Arc<dyn PasswordPolicy>,
        tokens: TokenIssuer,
    ) -> Self {
        Self {
            repo,
            publisher,
            policy,
            tokens,
        }
    }

    /// Resolve a username to zero or one user.
    ///
    /// More than one match means the unique index is broken, which is reported
    /// as a data integrity fault rather than picking one.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let mut matches = self.repo.query(UserFilter::by_username(username)).await?;

        match matches.len() {
            0 | 1 => Ok(matches.pop()),
            n => {
                tracing::error!(username = %username, matches = n, "Username is not unique");
                Err(AppError::data_integrity(format!(
                    "{} users share username '{}'",
                    n, username
                )))
            }
        }
    }

    async fn get_by_username(&self, username: &str) -> AppResult<User> {
        self.find_by_username(username).await?.ok_or_not_found()
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<User> {
        self.repo.get(id).await?.ok_or_not_found()
    }

    /// Confirmation first, then policy, for every path that stores a new password.
    fn check_new_password(&self, password: &str, confirm_password: &str) -> AppResult<()> {
        if password != confirm_password {
            return Err(AppError::PasswordMismatch);
        }
        if !self.policy.validate(password) {
            return Err(AppError::policy(self.policy.describe()));
        }
        Ok(())
    }

    async fn publish(&self, event: UserEvent) -> AppResult<()> {
        self.publisher.publish(&event).await.map_err(|e| {
            tracing::error!(
                event = event.name(),
                user_id = %event.user_id(),
                error = %e,
                "Failed to publish user event after commit"
            );
            e
        })
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn register(&self, request: RegisterUser) -> AppResult<User> {
        if self.find_by_username(&request.username).await?.is_some() {
            return Err(AppError::already_exists("User"));
        }

        let mut user = User::register(request.username, request.profile);
        self.check_new_password(&request.password, &request.confirm_password)?;
        user.set_password(&request.password)?;

        self.repo.create(&user).await?;
        tracing::info!(user_id = %user.id(), username = %user.username(), "User registered");

        self.publish(user.changed_event().into()).await?;
        Ok(user)
    }

    async fn update_profile(&self, request: UpdateProfile) -> AppResult<User> {
        let id = request.id.ok_or(AppError::MissingIdentifier)?;
        let mut user = self.get_by_id(id).await?;

        user.update_profile(request.profile);

        self.repo.update(&user).await?;
        tracing::info!(user_id = %user.id(), "User profile updated");

        self.publish(user.changed_event().into()).await?;
        Ok(user)
    }

    async fn remove(&self, id: Uuid) -> AppResult<()> {
        let user = self.get_by_id(id).await?;

        self.repo.remove(&user).await?;
        tracing::info!(user_id = %id, "User removed");

        self.publish(UserRemoved { id }.into()).await
    }

    async fn set_password(&self, request: SetPassword) -> AppResult<()> {
        let mut user = self.get_by_username(&request.username).await?;

        self.check_new_password(&request.password, &request.confirm_password)?;
        user.set_password(&request.password)?;

        self.repo.update(&user).await?;
        tracing::info!(user_id = %user.id(), "Password set");
        Ok(())
    }

    async fn change_password(&self, request: ChangePassword) -> AppResult<()> {
        let mut user = self.get_by_username(&request.username).await?;

        if !user.verify_password(&request.old_password) {
            tracing::warn!(user_id = %user.id(), "Password change rejected: old password does not match");
            return Err(AppError::InvalidCredentials);
        }

        self.check_new_password(&request.new_password, &request.confirm_password)?;
        user.set_password(&request.new_password)?;

        self.repo.update(&user).await?;
        tracing::info!(user_id = %user.id(), "Password changed");
        Ok(())
    }

    async fn sign_in(&self, request: SignIn) -> AppResult<SignedInUser> {
        let user = self.get_by_username(&request.username).await?;

        if !user.verify_password(&request.password) {
            tracing::warn!(user_id = %user.id(), "Sign-in rejected: invalid credentials");
            return Err(AppError::InvalidCredentials);
        }

        let signed = self.tokens.issue(&user)?;
        tracing::debug!(user_id = %user.id(), "Token issued");

        Ok(SignedInUser {
            token: signed.token,
            expires_at: signed.expires_at,
            id: user.id(),
            username: user.username().to_string(),
            email: user.email().to_string(),
        })
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.get_by_id(id).await
    }
}
