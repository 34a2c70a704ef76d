pub mod auth;
pub mod home;
pub mod json_error;
pub mod profile;
pub mod system;
