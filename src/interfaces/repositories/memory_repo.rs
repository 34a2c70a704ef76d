use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::entities::{profile::Profile, user::User};

/// Users keyed by id, with a normalized-email index for login lookups.
#[derive(Clone, Default)]
pub struct MemoryUserRepo {
    pub users: Arc<DashMap<Uuid, User>>,
    pub emails: Arc<DashMap<String, Uuid>>,
}

/// One profile per user. Each mutation runs under the profile's shard lock.
#[derive(Clone, Default)]
pub struct MemoryProfileRepo {
    pub profiles: Arc<DashMap<Uuid, Profile>>,
}
