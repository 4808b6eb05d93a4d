//! User Entity
//!
//! Identity record read by the credential verifier and the session gate.
//! Users are provisioned elsewhere; this crate never writes them.

use chrono::{DateTime, Utc};
use platform::password::{ClearTextPassword, HashedPassword};

use crate::domain::value_object::{user_id::UserId, user_name::Username};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Unique username used for login
    pub username: Username,
    /// Argon2id PHC hash
    pub password_hash: HashedPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(username: Username, password_hash: HashedPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            username,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check a password against the stored hash (constant-time)
    pub fn verify_password(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        self.password_hash.verify(password, pepper)
    }
}
