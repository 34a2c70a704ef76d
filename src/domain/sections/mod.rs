//! Headless profile sections.
//!
//! Each section keeps only its own dialog state. Lists come in from the
//! container on every call and user intent goes back out as an action value.

pub mod accomplishments;
pub mod skills;
