//! Typed client for the profile API, the container that keeps a profile in
//! sync with it, and the smoke runner built on top of both.

pub mod api;
pub mod container;
pub mod error;
pub mod smoke;

pub use api::{ApiClient, ProfileApi, Session};
pub use container::ProfileContainer;
pub use error::{ClientError, TransportDetail};
pub use smoke::{Credentials, SmokeConfig, SmokeReport, SmokeRunner, SmokeStep, StepOutcome};
