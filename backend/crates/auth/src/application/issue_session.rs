//! Session Issuance
//!
//! Mints the access/refresh/csrf triple shared by sign-in and refresh.

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::domain::entity::{
    csrf_token::CsrfToken, refresh_token::RefreshToken, session::IssuedSession,
};
use crate::domain::services::{issue_access_token, issue_csrf_token, issue_refresh_token};
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;

/// Mint fresh credentials for `user_id`. Nothing is persisted here.
pub fn issue_session(
    config: &AuthConfig,
    user_id: UserId,
    now: DateTime<Utc>,
) -> AuthResult<IssuedSession> {
    let access_token = issue_access_token(
        &user_id,
        &config.token_secret,
        &config.token_issuer,
        config.access_token_ttl,
        now,
    )?;
    let refresh_token = issue_refresh_token()?;
    let csrf_token = issue_csrf_token()?;

    Ok(IssuedSession {
        user_id,
        access_token,
        refresh_token,
        csrf_token,
        refresh: RefreshToken::issue(user_id, now, config.refresh_token_ttl),
        csrf: CsrfToken::issue(user_id, now),
    })
}
