//! Refresh Token Entity
//!
//! Server-side record of an opaque refresh token. The token value itself
//! is never kept here; the store indexes records by its SHA-256 digest.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::user_id::UserId;

/// Usability of a refresh token at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTokenStatus {
    Active,
    Expired,
    Revoked,
}

/// Refresh token record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    /// Owner
    pub user_id: UserId,
    /// Hard expiry
    pub expires_at: DateTime<Utc>,
    /// Set on logout or rotation
    pub revoked_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Create a record for a freshly minted token
    pub fn issue(user_id: UserId, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            user_id,
            expires_at: now + ttl,
            revoked_at: None,
            created_at: now,
        }
    }

    /// Strictly after `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Expiry wins over revocation
    pub fn status_at(&self, now: DateTime<Utc>) -> RefreshTokenStatus {
        if self.is_expired_at(now) {
            RefreshTokenStatus::Expired
        } else if self.is_revoked() {
            RefreshTokenStatus::Revoked
        } else {
            RefreshTokenStatus::Active
        }
    }

    /// Mark revoked; keeps the first revocation time
    pub fn revoke(&mut self, now: DateTime<Utc>) {
        self.revoked_at.get_or_insert(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_at(now: DateTime<Utc>) -> RefreshToken {
        RefreshToken::issue(UserId::new(), now, Duration::days(30))
    }

    #[test]
    fn test_issue_sets_expiry() {
        let now = Utc::now();
        let token = token_at(now);
        assert_eq!(token.expires_at, now + Duration::days(30));
        assert_eq!(token.created_at, now);
        assert_eq!(token.status_at(now), RefreshTokenStatus::Active);
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let token = token_at(now);

        assert!(!token.is_expired_at(token.expires_at));
        assert!(token.is_expired_at(token.expires_at + Duration::seconds(1)));
        assert_eq!(
            token.status_at(now + Duration::days(31)),
            RefreshTokenStatus::Expired
        );
    }

    #[test]
    fn test_expired_wins_over_revoked() {
        let now = Utc::now();
        let mut token = token_at(now);
        token.revoke(now);

        assert_eq!(token.status_at(now), RefreshTokenStatus::Revoked);
        assert_eq!(
            token.status_at(now + Duration::days(31)),
            RefreshTokenStatus::Expired
        );
    }

    #[test]
    fn test_revoke_is_idempotent() {
        let now = Utc::now();
        let mut token = token_at(now);
        token.revoke(now);
        token.revoke(now + Duration::hours(1));
        assert_eq!(token.revoked_at, Some(now));
    }
}
