pub mod auth;
pub mod extractors;
pub mod profile;
