pub mod memory_repo;
pub mod profile;
pub mod token;
pub mod user;
