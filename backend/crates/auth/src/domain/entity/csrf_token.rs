//! CSRF Token Entity
//!
//! Double-submit token: the same value travels in the script-readable
//! `csrfToken` cookie and the `X-CSRF-TOKEN` header. It lives until logout
//! or rotation; the cookie lifetime is its only expiry.

use chrono::{DateTime, Utc};

use crate::domain::value_object::user_id::UserId;

/// CSRF token record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken {
    /// Owner
    pub user_id: UserId,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl CsrfToken {
    pub fn issue(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            created_at: now,
        }
    }

    pub fn belongs_to(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}
