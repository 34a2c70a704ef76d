use uuid::Uuid;

use crate::errors::AppError;

/// What a viewer may do with someone's profile.
///
/// Owners add and delete their own records; everybody else may only endorse.
/// Both the section components and the server use cases ask this value instead
/// of comparing user ids themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileAccess {
    viewer: Uuid,
    owner: Uuid,
}

impl ProfileAccess {
    pub fn new(viewer: Uuid, owner: Uuid) -> Self {
        ProfileAccess { viewer, owner }
    }

    /// Access of a user to their own profile.
    pub fn own(user_id: Uuid) -> Self {
        ProfileAccess::new(user_id, user_id)
    }

    pub fn viewer(&self) -> Uuid {
        self.viewer
    }

    pub fn owner(&self) -> Uuid {
        self.owner
    }

    pub fn is_owner(&self) -> bool {
        self.viewer == self.owner
    }

    pub fn can_edit(&self) -> bool {
        self.is_owner()
    }

    pub fn can_endorse(&self) -> bool {
        !self.is_owner()
    }

    pub fn require_edit(&self) -> Result<(), AppError> {
        if self.can_edit() {
            Ok(())
        } else {
            Err(AppError::ForbiddenAccess("Only the profile owner can modify it".to_string()))
        }
    }

    pub fn require_endorse(&self) -> Result<(), AppError> {
        if self.can_endorse() {
            Ok(())
        } else {
            Err(AppError::ForbiddenAccess("You cannot endorse your own skill".to_string()))
        }
    }
}
