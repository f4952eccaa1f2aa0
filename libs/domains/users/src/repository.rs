use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};

/// Repository trait for staff account persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new account (email must be unique)
    async fn create(&self, input: NewUser) -> UserResult<User>;

    /// Get an account by ID
    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>>;

    /// Get an account by login email
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i32, User>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: NewUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        let email_taken = users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&input.email));
        if email_taken {
            return Err(UserError::EmailTaken(input.email));
        }

        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            role: input.role,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(email: &str) -> NewUser {
        NewUser {
            name: "Barista".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role: "staff".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(staff("barista@cafe.test")).await.unwrap();

        let by_id = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id, user);

        let by_email = repo.get_by_email("barista@cafe.test").await.unwrap();
        assert_eq!(by_email, Some(user));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(staff("barista@cafe.test")).await.unwrap();

        // Case-insensitive match
        let result = repo.create(staff("Barista@Cafe.test")).await;
        assert!(matches!(result, Err(UserError::EmailTaken(_))));
    }
}
