//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Token values are passed in clear; implementations decide how they are
//! indexed (the Postgres store keeps SHA-256 digests only).

use crate::domain::entity::{
    csrf_token::CsrfToken, refresh_token::RefreshToken, session::IssuedSession, user::User,
};
use crate::domain::value_object::{user_id::UserId, user_name::Username};
use crate::error::AuthResult;

/// User repository trait (read-only)
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by username (exact match)
    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<User>>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;
}

/// Refresh and csrf token persistence
#[trait_variant::make(TokenStore: Send)]
pub trait LocalTokenStore {
    /// Persist a refresh token record
    async fn store_refresh_token(&self, token: &str, record: &RefreshToken) -> AuthResult<()>;

    /// Persist a csrf token record
    async fn store_csrf_token(&self, token: &str, record: &CsrfToken) -> AuthResult<()>;

    /// Fails with `TokenNotFound` if absent
    async fn get_refresh_token(&self, token: &str) -> AuthResult<RefreshToken>;

    /// Fails with `TokenNotFound` if absent
    async fn get_csrf_token(&self, token: &str) -> AuthResult<CsrfToken>;

    /// Mark revoked (idempotent)
    async fn revoke_refresh_token(&self, token: &str) -> AuthResult<()>;

    /// Remove the row (idempotent)
    async fn delete_csrf_token(&self, token: &str) -> AuthResult<()>;

    /// Store the refresh and csrf records of a new session atomically
    async fn open_session(&self, session: &IssuedSession) -> AuthResult<()>;

    /// Consume `presented_refresh` and store `next` atomically.
    ///
    /// The presented token must still be active and owned by
    /// `next.user_id`; otherwise nothing is written and the call fails with
    /// `Unauthenticated`. `presented_csrf`, if any, is deleted in the same
    /// unit of work.
    async fn rotate_session(
        &self,
        presented_refresh: &str,
        presented_csrf: Option<&str>,
        next: &IssuedSession,
    ) -> AuthResult<()>;

    /// Revoke the refresh token and delete the csrf token atomically
    async fn close_session(&self, refresh_token: &str, csrf_token: &str) -> AuthResult<()>;
}
