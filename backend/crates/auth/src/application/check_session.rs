//! Check Session Use Case
//!
//! The protected-request gate and the lighter access-token check.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{TokenStore, UserRepository};
use crate::domain::services::{AccessTokenError, validate_access_token};
use crate::domain::value_object::{user_id::UserId, user_name::Username};
use crate::error::{AuthError, AuthResult};

/// Identity attached to requests that passed the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: Username,
}

/// Check session use case
pub struct CheckSessionUseCase<U, T>
where
    U: UserRepository,
    T: TokenStore,
{
    user_repo: Arc<U>,
    token_store: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, T> CheckSessionUseCase<U, T>
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

    /// Gate for state-changing requests.
    ///
    /// Requires the access token and the echoed csrf token; the csrf token
    /// must be stored and owned by the access token's subject, and that
    /// user must still exist. Storage failures surface as such.
    pub async fn authorize(
        &self,
        access_token: Option<&str>,
        csrf_token: Option<&str>,
    ) -> AuthResult<AuthenticatedUser> {
        let access_token =
            access_token.ok_or_else(|| AuthError::unauthenticated("missing access token"))?;
        let csrf_token = csrf_token.ok_or_else(|| AuthError::unauthenticated("missing csrf token"))?;

        let csrf = match self.token_store.get_csrf_token(csrf_token).await {
            Ok(csrf) => csrf,
            Err(AuthError::TokenNotFound) => {
                return Err(AuthError::unauthenticated("unknown csrf token"));
            }
            Err(e) => return Err(e),
        };

        let user_id = self.subject(access_token)?;

        if !csrf.belongs_to(&user_id) {
            tracing::warn!(user_id = %user_id, "CSRF token owned by another user");
            return Err(AuthError::unauthenticated("csrf token user mismatch"));
        }

        self.existing_user(user_id).await
    }

    /// Access token only: signature, expiry and the user still existing
    pub async fn validate(&self, access_token: Option<&str>) -> AuthResult<AuthenticatedUser> {
        let access_token =
            access_token.ok_or_else(|| AuthError::unauthenticated("missing access token"))?;
        let user_id = self.subject(access_token)?;
        self.existing_user(user_id).await
    }

    fn subject(&self, access_token: &str) -> AuthResult<UserId> {
        validate_access_token(
            access_token,
            &self.config.token_secret,
            &self.config.token_issuer,
            Utc::now(),
        )
        .map_err(|e| match e {
            AccessTokenError::Expired => AuthError::unauthenticated("access token expired"),
            AccessTokenError::InvalidSignature => {
                AuthError::unauthenticated("access token signature invalid")
            }
            AccessTokenError::Malformed => AuthError::unauthenticated("access token malformed"),
        })
    }

    async fn existing_user(&self, user_id: UserId) -> AuthResult<AuthenticatedUser> {
        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AuthError::unauthenticated("user no longer exists"))?;

        Ok(AuthenticatedUser {
            user_id: user.user_id,
            username: user.username,
        })
    }
}
