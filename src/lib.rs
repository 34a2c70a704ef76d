mod domain;
mod interfaces;
mod infrastructure;
pub mod background_task;
pub mod client;
pub mod constants;
pub mod errors;
pub mod server;
pub mod settings;
pub mod telemetry;

pub use domain::{access, entities, password, sections, use_cases};
pub use interfaces::{handlers, middlewares, repositories, routes};
pub use infrastructure::{auth, limiter, utils};

use auth::jwt::JwtService;
use errors::AppError;
use limiter::rate_limiter::LoginRateLimiter;
use repositories::memory_repo::{MemoryProfileRepo, MemoryUserRepo};
use settings::AppConfig;
use use_cases::{auth::AuthHandler, profile::ProfileHandler};

pub type AppAuthHandler = AuthHandler<MemoryUserRepo, JwtService>;
pub type AppProfileHandler = ProfileHandler<MemoryProfileRepo>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub profile_handler: AppProfileHandler,
    pub login_limiter: LoginRateLimiter,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let jwt_service = JwtService::new(config);
        let auth_handler = AuthHandler::new(MemoryUserRepo::new(), jwt_service);
        let profile_handler = ProfileHandler::new(MemoryProfileRepo::new());
        let login_limiter = LoginRateLimiter::new(
            config.login_burst,
            config.login_refill_per_minute,
            config.trust_x_forwarded_for,
        );

        AppState {
            auth_handler,
            profile_handler,
            login_limiter,
        }
    }

    /// Creates the configured seed account, if any. Safe to call repeatedly.
    pub async fn seed(&self, config: &AppConfig) -> Result<(), AppError> {
        if let Some(seed) = config.seed_user() {
            let user_id = self.auth_handler.ensure_seed_user(&seed).await?;
            tracing::debug!(user_id = %user_id, "Seed user ready");
        }
        Ok(())
    }
}
