//! Sign Out Use Case
//!
//! Revokes the refresh token and deletes the csrf token of one session.

use std::sync::Arc;

use crate::domain::repository::TokenStore;
use crate::error::{AuthError, AuthResult};

/// Sign out use case
pub struct SignOutUseCase<T>
where
    T: TokenStore,
{
    token_store: Arc<T>,
}

impl<T> SignOutUseCase<T>
where
    T: TokenStore,
{
    pub fn new(token_store: Arc<T>) -> Self {
        Self { token_store }
    }

    /// Both cookies are required; unknown values are not an error
    pub async fn execute(
        &self,
        refresh_token: Option<&str>,
        csrf_token: Option<&str>,
    ) -> AuthResult<()> {
        let refresh_token = refresh_token.ok_or(AuthError::BadRequest("Not logged in"))?;
        let csrf_token = csrf_token.ok_or(AuthError::BadRequest("Missing CSRF token"))?;

        self.token_store
            .close_session(refresh_token, csrf_token)
            .await?;

        tracing::info!("User signed out");
        Ok(())
    }
}
