pub mod auth;
pub mod limiter;
pub mod utils;
