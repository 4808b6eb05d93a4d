//! Credential Verifier
//!
//! Checks a username/password pair against the stored hash. No side effects.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_name::Username;
use crate::error::{AuthError, AuthResult};

/// Credential verifier
pub struct CredentialVerifier<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> CredentialVerifier<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// `UserNotFound` for an unknown or blank username,
    /// `InvalidCredentials` for a wrong password.
    pub async fn verify(&self, username: &str, password: String) -> AuthResult<User> {
        let username = Username::for_lookup(username).ok_or(AuthError::UserNotFound)?;

        let user = self
            .user_repo
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let password =
            ClearTextPassword::new(password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user.verify_password(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }
}
