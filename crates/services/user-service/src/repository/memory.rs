//! In-memory repository for development and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{UserFilter, UserRepository};
use common::{AppError, AppResult};
use domain::User;

/// `HashMap` keyed by user id behind an async lock.
///
/// Mirrors the unique username index of the SQL schema on `create`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Store a user as-is, skipping the uniqueness check.
    ///
    /// Lets tests reproduce a store that lost its unique index.
    pub async fn insert_unchecked(&self, user: User) {
        self.users.write().await.insert(user.id(), user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn query(&self, filter: UserFilter) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| filter.matches(u)).cloned().collect())
    }

    async fn create(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id())
            || users.values().any(|u| u.username() == user.username())
        {
            return Err(AppError::already_exists("User"));
        }

        users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.write().await;

        match users.get_mut(&user.id()) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(AppError::NotFound),
        }
    }

    async fn remove(&self, user: &User) -> AppResult<()> {
        self.users
            .write()
            .await
            .remove(&user.id())
            .map(|_| ())
            .ok_or(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain::{Address, Profile};

    fn user(username: &str) -> User {
        User::register(
            username,
            Profile {
                email: format!("{username}@example.com"),
                first_name: "Jane".to_string(),
                second_name: "Doe".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
                address: Address::new("Gdansk", "80-001", "Długa 1"),
            },
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryUserRepository::new();
        let jane = user("jane");

        repo.create(&jane).await.unwrap();

        let found = repo.get(jane.id()).await.unwrap().unwrap();
        assert_eq!(found.username(), "jane");
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_username() {
        let repo = InMemoryUserRepository::new();
        repo.create(&user("jane")).await.unwrap();

        let result = repo.create(&user("jane")).await;
        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_query_by_username() {
        let repo = InMemoryUserRepository::new();
        repo.create(&user("jane")).await.unwrap();
        repo.create(&user("john")).await.unwrap();

        let found = repo.query(UserFilter::by_username("john")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].username(), "john");

        let none = repo.query(UserFilter::by_username("nobody")).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repo = InMemoryUserRepository::new();
        let result = repo.update(&user("ghost")).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = InMemoryUserRepository::new();
        let jane = user("jane");
        repo.create(&jane).await.unwrap();

        repo.remove(&jane).await.unwrap();

        assert!(repo.get(jane.id()).await.unwrap().is_none());
        assert!(repo.is_empty().await);
        assert!(matches!(repo.remove(&jane).await, Err(AppError::NotFound)));
    }
}
