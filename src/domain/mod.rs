pub mod access;
pub mod entities;
pub mod password;
pub mod sections;
pub mod use_cases;
