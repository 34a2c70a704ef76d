use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const API_PREFIX: &str = "/api";
pub const TOKEN_TYPE: &str = "Bearer";

/// Routes reachable without a bearer token, as (path, method).
pub const PUBLIC_ROUTES: &[(&str, &str)] = &[
    ("/", "GET"),
    ("/api/health", "GET"),
    ("/api/auth/login", "POST"),
    ("/api/auth/register", "POST"),
];
