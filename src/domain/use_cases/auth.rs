use uuid::Uuid;
use validator::Validate;

use crate::entities::token::AuthResponse;
use crate::entities::user::{LoginUser, NewUser, User, UserResponse};
use crate::errors::{AppError, AuthError};
use crate::interfaces::repositories::user::UserRepository;
use crate::auth::password::{hash_password, verify_password};
use crate::repositories::token::TokenServiceRepository;
use crate::settings::SeedUser;

pub struct AuthHandler<R, T>
where
    R: UserRepository,
    T: TokenServiceRepository,
{
    pub user_repo: R,
    pub token_service: T,
}

impl<R, T> AuthHandler<R, T>
where
    R: UserRepository,
    T: TokenServiceRepository,
{
    pub fn new(user_repo: R, token_service: T) -> Self {
        AuthHandler {
            user_repo,
            token_service
        }
    }

    /// Registers a new user after validation and password hashing
    pub async fn register(&self, request: NewUser) -> Result<UserResponse, AppError> {
        request.validate()?;

        let hashed_password = hash_password(&request.password)?;
        let user = request.prepare_for_insert(hashed_password);
        let response = UserResponse::from(&user);

        self.user_repo.create_user(user).await?;

        tracing::info!(user_id = %response.id, "User registered");
        Ok(response)
    }

    /// Creates the configured seed account unless its email is already taken.
    /// Skips the strength check: seed passwords are fixtures.
    pub async fn ensure_seed_user(&self, seed: &SeedUser) -> Result<Uuid, AppError> {
        if let Some(existing) = self.user_repo.get_user_by_email(&seed.email).await? {
            return Ok(existing.id);
        }

        let request = NewUser {
            email: seed.email.clone(),
            password: seed.password.clone(),
            name: seed.name.clone(),
        };
        let user = request.prepare_for_insert(hash_password(&seed.password)?);
        let id = self.user_repo.create_user(user).await?;

        tracing::info!(user_id = %id, email = %seed.email, "Seed user created");
        Ok(id)
    }

    /// Logs in a user by validating credentials and issuing an access token
    pub async fn login(&self, request: LoginUser) -> Result<AuthResponse, AuthError> {
        request.validate()?;

        let user = self.user_repo.get_user_by_email(&request.email)
            .await
            .map_err(|_| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        let is_password_valid = verify_password(&request.password, &user.password_hash)
            .map_err(|e| {
                tracing::warn!(user_id = %user.id, "Stored password hash unusable: {}", e);
                AuthError::WrongCredentials
            })?;
        if !is_password_valid {
            tracing::info!("Login rejected: wrong password");
            return Err(AuthError::WrongCredentials);
        }

        let response = self.create_auth_response(&user)?;

        tracing::info!(user_id = %user.id, "User logged in successfully");
        Ok(response)
    }

    pub fn create_auth_response(&self, user: &User) -> Result<AuthResponse, AuthError> {
        let token = self.token_service.create_jwt(user)
            .map_err(|e| {
                tracing::warn!("Failed to create JWT: {}", e);
                AuthError::TokenCreation
            })?;

        Ok(AuthResponse::new(token, UserResponse::from(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::JwtService;
    use crate::repositories::memory_repo::MemoryUserRepo;
    use crate::settings::{AppConfig, AppEnvironment};

    fn handler() -> AuthHandler<MemoryUserRepo, JwtService> {
        let config = AppConfig {
            env: AppEnvironment::Testing,
            name: "test".into(),
            port: 0,
            host: "127.0.0.1".into(),
            worker_count: 1,
            cors_allowed_origins: vec!["*".into()],
            jwt_secret: "unit_test_secret_that_is_long_enough_for_hs512".into(),
            jwt_expiration_minutes: 5,
            login_burst: 5,
            login_refill_per_minute: 5,
            trust_x_forwarded_for: false,
            seed_user_email: None,
            seed_user_password: None,
            seed_user_name: None,
        };
        AuthHandler::new(MemoryUserRepo::new(), JwtService::new(&config))
    }

    fn seed() -> SeedUser {
        SeedUser {
            email: "test@example.com".into(),
            password: "password123".into(),
            name: "Test User".into(),
        }
    }

    #[tokio::test]
    async fn seed_user_can_log_in_and_is_idempotent() {
        let handler = handler();
        let first = handler.ensure_seed_user(&seed()).await.unwrap();
        let second = handler.ensure_seed_user(&seed()).await.unwrap();
        assert_eq!(first, second);

        let auth = handler
            .login(LoginUser { email: "test@example.com".into(), password: "password123".into() })
            .await
            .unwrap();

        assert_eq!(auth.user.id, first);
        assert!(!auth.token.is_empty());
        assert_eq!(auth.token_type, "Bearer");
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let handler = handler();
        handler.ensure_seed_user(&seed()).await.unwrap();

        let result = handler
            .login(LoginUser { email: "test@example.com".into(), password: "nope".into() })
            .await;

        assert!(matches!(result, Err(AuthError::WrongCredentials)));
    }

    #[tokio::test]
    async fn weak_registration_password_fails_validation() {
        let result = handler()
            .register(NewUser {
                email: "weak@example.com".into(),
                password: "password123".into(),
                name: "Weak".into(),
            })
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
