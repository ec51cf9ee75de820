//! User repository contract and its SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Predicate for [`UserRepository::query`]. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub username: Option<String>,
}

impl UserFilter {
    /// Exact username match
    pub fn by_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::default()
        }
    }

    /// Evaluate the predicate against an aggregate.
    pub fn matches(&self, user: &User) -> bool {
        self.username.as_deref().map_or(true, |u| user.username() == u)
    }
}

/// Persistent store of user aggregates.
///
/// Single-record atomicity only; no transactions span calls.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn get(&self, id: Uuid) -> AppResult<Option<User>>;

    /// All users matching the filter
    async fn query(&self, filter: UserFilter) -> AppResult<Vec<User>>;

    /// Insert a new user
    async fn create(&self, user: &User) -> AppResult<()>;

    /// Overwrite an existing user
    async fn update(&self, user: &User) -> AppResult<()>;

    /// Permanently delete a user
    async fn remove(&self, user: &User) -> AppResult<()>;
}

/// Postgres-backed repository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn get(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(User::try_from).transpose()
    }

    async fn query(&self, filter: UserFilter) -> AppResult<Vec<User>> {
        let condition = Condition::all()
            .add_option(filter.username.map(|u| user::Column::Username.eq(u)));

        let models = UserEntity::find()
            .filter(condition)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        models.into_iter().map(User::try_from).collect()
    }

    async fn create(&self, user: &User) -> AppResult<()> {
        ActiveModel::from(user)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        user::update_model(user)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                sea_orm::DbErr::RecordNotUpdated => AppError::NotFound,
                other => AppError::from(other),
            })?;
        Ok(())
    }

    async fn remove(&self, user: &User) -> AppResult<()> {
        let result = UserEntity::delete_by_id(user.id())
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
