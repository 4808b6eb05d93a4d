//! Issued Session
//!
//! The three credentials handed to a client at login or refresh.

use std::fmt;

use crate::domain::entity::{csrf_token::CsrfToken, refresh_token::RefreshToken};
use crate::domain::value_object::user_id::UserId;

/// Freshly minted credentials plus the records the store persists for them
#[derive(Clone)]
pub struct IssuedSession {
    pub user_id: UserId,
    /// Signed access token (not persisted)
    pub access_token: String,
    /// Opaque refresh token value
    pub refresh_token: String,
    /// Opaque csrf token value
    pub csrf_token: String,
    pub refresh: RefreshToken,
    pub csrf: CsrfToken,
}

impl fmt::Debug for IssuedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedSession")
            .field("user_id", &self.user_id)
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("csrf_token", &"[REDACTED]")
            .field("refresh", &self.refresh)
            .field("csrf", &self.csrf)
            .finish()
    }
}
