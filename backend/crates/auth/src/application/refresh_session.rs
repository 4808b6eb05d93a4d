//! Refresh Session Use Case
//!
//! Exchanges an active refresh token for a new credential triple. The
//! presented token is consumed (single use); a second presentation fails.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::issue_session::issue_session;
use crate::domain::entity::{refresh_token::RefreshTokenStatus, session::IssuedSession};
use crate::domain::repository::{TokenStore, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Refresh session use case
pub struct RefreshSessionUseCase<U, T>
where
    U: UserRepository,
    T: TokenStore,
{
    user_repo: Arc<U>,
    token_store: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, T> RefreshSessionUseCase<U, T>
where
    U: UserRepository,
    T: TokenStore,
{
    pub fn new(user_repo: Arc<U>, token_store: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            token_store,
            config,
        }
    }

    /// `csrf_token` is the csrf cookie sent along, deleted on success
    pub async fn execute(
        &self,
        refresh_token: Option<&str>,
        csrf_token: Option<&str>,
    ) -> AuthResult<IssuedSession> {
        let refresh_token =
            refresh_token.ok_or_else(|| AuthError::unauthenticated("missing refresh token"))?;

        let record = match self.token_store.get_refresh_token(refresh_token).await {
            Ok(record) => record,
            Err(AuthError::TokenNotFound) => {
                return Err(AuthError::unauthenticated("unknown refresh token"));
            }
            Err(e) => return Err(e),
        };

        let now = Utc::now();
        match record.status_at(now) {
            RefreshTokenStatus::Active => {}
            RefreshTokenStatus::Expired => {
                return Err(AuthError::unauthenticated("refresh token expired"));
            }
            RefreshTokenStatus::Revoked => {
                tracing::warn!(user_id = %record.user_id, "Revoked refresh token presented");
                return Err(AuthError::unauthenticated("refresh token revoked"));
            }
        }

        let user = self
            .user_repo
            .find_by_id(&record.user_id)
            .await?
            .ok_or_else(|| AuthError::unauthenticated("user no longer exists"))?;

        let session = issue_session(&self.config, user.user_id, now)?;
        self.token_store
            .rotate_session(refresh_token, csrf_token, &session)
            .await?;

        tracing::info!(user_id = %user.user_id, "Session refreshed");

        Ok(session)
    }
}
