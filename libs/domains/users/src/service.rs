use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, RegisterRequest, User};
use crate::repository::UserRepository;

/// Service layer for User business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new user with a hashed password.
    ///
    /// New accounts are active and non-staff.
    pub async fn register(&self, input: RegisterRequest) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        if self.repository.username_exists(&input.username).await? {
            return Err(UserError::DuplicateUsername(input.username));
        }

        let password_hash = self.hash_password(&input.password)?;

        self.repository
            .create(NewUser::regular(input.username, input.email, password_hash))
            .await
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: i64) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Verify user credentials (for login)
    ///
    /// Fails with `InvalidCredentials` for unknown usernames, wrong
    /// passwords, and inactive accounts alike.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> UserResult<User> {
        let user = self
            .repository
            .get_by_username(username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !user.is_active {
            return Err(UserError::InvalidCredentials);
        }

        if !self.verify_password(password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    // Password helpers

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
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

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserRepository;

    fn register_request(username: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "pw".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let service = UserService::new(InMemoryUserRepository::new());

        let user = service.register(register_request("alice")).await.unwrap();
        assert_ne!(user.password_hash, "pw");
        assert!(user.password_hash.starts_with("$argon2"));
        assert!(user.is_active);
        assert!(!user.is_staff);
    }

    #[tokio::test]
    async fn test_register_duplicate_username_conflicts() {
        let service = UserService::new(InMemoryUserRepository::new());

        service.register(register_request("alice")).await.unwrap();
        let result = service.register(register_request("alice")).await;
        assert!(matches!(result, Err(UserError::DuplicateUsername(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_email() {
        let service = UserService::new(InMemoryUserRepository::new());

        let result = service
            .register(RegisterRequest {
                username: "alice".to_string(),
                email: "nope".to_string(),
                password: "pw".to_string(),
            })
            .await;
        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_verify_credentials_accepts_correct_password() {
        let service = UserService::new(InMemoryUserRepository::new());
        service.register(register_request("alice")).await.unwrap();

        let user = service.verify_credentials("alice", "pw").await.unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_verify_credentials_rejects_wrong_password() {
        let service = UserService::new(InMemoryUserRepository::new());
        service.register(register_request("alice")).await.unwrap();

        let result = service.verify_credentials("alice", "wrong").await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_verify_credentials_rejects_unknown_user() {
        let service = UserService::new(InMemoryUserRepository::new());

        let result = service.verify_credentials("ghost", "pw").await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }
}
