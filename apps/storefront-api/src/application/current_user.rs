//! Authenticated actor context.
//!
//! Identity is established by the external authentication collaborator
//! before any core operation runs; the core only consumes the result.

use serde::{Deserialize, Serialize};

use crate::domain::shared::UserId;

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer.
    User,
    /// Store administrator.
    Admin,
}

/// The authenticated user on whose behalf an operation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User identifier.
    pub id: UserId,
    /// Username, snapshotted onto orders at placement.
    pub username: String,
    /// Authorization role.
    pub role: Role,
}

impl CurrentUser {
    /// Whether this user holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether this user may read or mutate the given order owner's data.
    #[must_use]
    pub fn can_access(&self, owner: &UserId) -> bool {
        self.is_admin() || &self.id == owner
    }
}
