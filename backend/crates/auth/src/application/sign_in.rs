//! Sign In Use Case
//!
//! Verifies credentials, mints a session and stores it in one transaction.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::issue_session::issue_session;
use crate::application::verify_credentials::CredentialVerifier;
use crate::domain::entity::session::IssuedSession;
use crate::domain::repository::{TokenStore, UserRepository};
use crate::error::AuthResult;

/// Sign in input
pub struct SignInInput {
    pub username: String,
    pub password: String,
}

/// Sign in use case
pub struct SignInUseCase<U, T>
where
    U: UserRepository,
    T: TokenStore,
{
    verifier: CredentialVerifier<U>,
    token_store: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, T> SignInUseCase<U, T>
where
    U: UserRepository,
    T: TokenStore,
{
    pub fn new(user_repo: Arc<U>, token_store: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            verifier: CredentialVerifier::new(user_repo, config.clone()),
            token_store,
            config,
        }
    }

    /// Any failure aborts before anything is persisted or returned
    pub async fn execute(&self, input: SignInInput) -> AuthResult<IssuedSession> {
        let user = self.verifier.verify(&input.username, input.password).await?;

        let session = issue_session(&self.config, user.user_id, Utc::now())?;
        self.token_store.open_session(&session).await?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(session)
    }
}
