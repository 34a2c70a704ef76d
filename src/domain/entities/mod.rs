pub mod achievement;
pub mod availability;
pub mod education;
pub mod experience;
pub mod portfolio;
pub mod profile;
pub mod skill;
pub mod token;
pub mod user;
