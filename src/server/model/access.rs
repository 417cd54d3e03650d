//! Resource visibility policy.
//!
//! Pure decision functions over an allow-list snapshot. Any resource shaped as
//! `{ owner, is_private, allowed_users, allowed_roles }` implements [`Restricted`] and
//! is evaluated by the same rule:
//!
//! 1. public resources are visible to everyone
//! 2. private resources are visible to users on the user allow-list
//! 3. or to holders of any role on the role allow-list
//! 4. everyone else is denied
//!
//! Ownership alone does not grant visibility of a private resource; owners are expected
//! to be on the allow-list. Ownership is checked separately by [`require_owner`] for
//! mutations.

use std::collections::BTreeSet;

use crate::server::error::{auth::AuthError, AppError};

/// Allow-list snapshot of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessScope {
    pub owner_id: i32,
    pub is_private: bool,
    pub allowed_users: BTreeSet<i32>,
    pub allowed_roles: BTreeSet<i32>,
}

impl AccessScope {
    /// Evaluates the visibility rule for a user holding `user_role_ids`.
    pub fn permits(&self, user_id: i32, user_role_ids: &[i32]) -> bool {
        if !self.is_private {
            return true;
        }

        if self.allowed_users.contains(&user_id) {
            return true;
        }

        user_role_ids
            .iter()
            .any(|role_id| self.allowed_roles.contains(role_id))
    }
}

/// A resource whose visibility is governed by an allow-list.
pub trait Restricted {
    fn access_scope(&self) -> AccessScope;
}

/// Returns whether `user_id`, holding `user_role_ids`, may see `resource`.
pub fn can_access<R: Restricted + ?Sized>(resource: &R, user_id: i32, user_role_ids: &[i32]) -> bool {
    resource.access_scope().permits(user_id, user_role_ids)
}

/// Rejects `caller_id` unless it is the resource owner.
///
/// # Arguments
/// - `owner_id` - Owner of the resource (event organizer, message author)
/// - `caller_id` - User attempting the action
/// - `action` - Short description of the attempted action, logged on denial
///
/// # Returns
/// - `Ok(())` - Caller is the owner
/// - `Err(AppError::AuthErr(AccessDenied))` - Caller is someone else
pub fn require_owner(owner_id: i32, caller_id: i32, action: &str) -> Result<(), AppError> {
    if owner_id == caller_id {
        return Ok(());
    }

    Err(AuthError::AccessDenied(
        caller_id,
        format!("only the owner (user {}) may {}", owner_id, action),
    )
    .into())
}
