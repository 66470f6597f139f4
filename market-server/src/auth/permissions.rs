//! Authorization predicates
//!
//! The ownership/role checks shared by every mutating handler. Failures are
//! 401 in the public API.

use super::CurrentUser;
use crate::security_log;
use shared::{AppError, AppResult};

/// Require the caller to hold the seller (or admin) role
pub fn require_seller(user: &CurrentUser) -> AppResult<()> {
    if user.is_seller() || user.is_admin() {
        return Ok(());
    }
    security_log!(
        "WARN",
        "role_denied",
        user_id = user.id.clone(),
        user_role = user.role.clone()
    );
    Err(AppError::unauthorized())
}

/// Allow only the resource owner or an admin
///
/// `owner_id` is the stored record link as a string ("user:abc"), the same
/// form the token carries in its subject.
pub fn ensure_owner_or_admin(user: &CurrentUser, owner_id: &str) -> AppResult<()> {
    if user.id == owner_id || user.is_admin() {
        return Ok(());
    }
    security_log!(
        "WARN",
        "ownership_denied",
        user_id = user.id.clone(),
        owner_id = owner_id.to_string()
    );
    Err(AppError::unauthorized())
}
