use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, RegisterRequest, User, UserResponse};
use crate::repository::UserRepository;

const DEFAULT_ROLE: &str = "staff";

/// Business logic for staff accounts: registration and credential
/// verification with argon2 password hashing.
#[derive(Debug, Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new staff account
    pub async fn register(&self, input: RegisterRequest) -> UserResult<UserResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        if self.repository.get_by_email(&input.email).await?.is_some() {
            return Err(UserError::EmailTaken(input.email));
        }

        let password_hash = self.hash_password(&input.password)?;
        let user = self
            .repository
            .create(NewUser {
                name: input.name,
                email: input.email,
                password_hash,
                role: DEFAULT_ROLE.to_string(),
            })
            .await?;

        Ok(user.into())
    }

    /// Verify login credentials. Returns the same error for an unknown
    /// email and a wrong password.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> UserResult<User> {
        let user = self
            .repository
            .get_by_email(email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Get an account by ID
    pub async fn get_user(&self, id: i32) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;
        Ok(user.into())
    }

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserRepository;

    fn service() -> UserService<InMemoryUserRepository> {
        UserService::new(InMemoryUserRepository::new())
    }

    fn registration() -> RegisterRequest {
        RegisterRequest {
            name: "Barista".to_string(),
            email: "barista@cafe.test".to_string(),
            password: "correct horse battery".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let service = service();
        let user = service.register(registration()).await.unwrap();
        assert_eq!(user.role, "staff");

        // The stored hash must verify against the original password
        let verified = service
            .verify_credentials("barista@cafe.test", "correct horse battery")
            .await
            .unwrap();
        assert_eq!(verified.id, user.id);
        assert!(verified.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let service = service();
        service.register(registration()).await.unwrap();

        let result = service
            .verify_credentials("barista@cafe.test", "wrong password")
            .await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_unknown_email_rejected() {
        let service = service();
        let result = service
            .verify_credentials("nobody@cafe.test", "whatever!")
            .await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let service = service();
        service.register(registration()).await.unwrap();

        let result = service.register(registration()).await;
        assert!(matches!(result, Err(UserError::EmailTaken(_))));
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let service = service();
        let mut input = registration();
        input.password = "short".to_string();

        let result = service.register(input).await;
        assert!(matches!(result, Err(UserError::Validation(_))));
    }
}
