//! Domain Services
//!
//! Token issuance and access token validation.

use chrono::{DateTime, Duration, Utc};
use platform::crypto::random_token;
use platform::jwt::{Claims, JwtError, sign_hs256, verify_hs256};
use thiserror::Error;

use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Why an access token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessTokenError {
    #[error("access token expired")]
    Expired,
    #[error("access token signature invalid")]
    InvalidSignature,
    #[error("access token malformed")]
    Malformed,
}

impl From<JwtError> for AccessTokenError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AccessTokenError::Expired,
            // A token from another issuer is as foreign as a forged one
            JwtError::InvalidSignature
            | JwtError::InvalidIssuer
            | JwtError::UnsupportedAlg(_)
            | JwtError::EmptySecret
            | JwtError::InvalidKey => AccessTokenError::InvalidSignature,
            JwtError::TokenFormat | JwtError::Base64 | JwtError::Json(_) => {
                AccessTokenError::Malformed
            }
        }
    }
}

/// Sign an access token for `user_id` expiring at `now + ttl`.
///
/// Deterministic for the same key, issuer and instant.
pub fn issue_access_token(
    user_id: &UserId,
    secret: &[u8],
    issuer: &str,
    ttl: Duration,
    now: DateTime<Utc>,
) -> AuthResult<String> {
    let iat = now.timestamp();
    let claims = Claims {
        iss: issuer.to_string(),
        sub: user_id.to_string(),
        iat,
        exp: iat + ttl.num_seconds(),
    };

    sign_hs256(secret, &claims).map_err(AuthError::Signing)
}

/// Opaque refresh token (32 random bytes, base64url)
pub fn issue_refresh_token() -> AuthResult<String> {
    Ok(random_token()?)
}

/// Opaque csrf token, drawn independently of the refresh token
pub fn issue_csrf_token() -> AuthResult<String> {
    Ok(random_token()?)
}

/// Verify signature, issuer and expiry; return the subject
pub fn validate_access_token(
    token: &str,
    secret: &[u8],
    issuer: &str,
    now: DateTime<Utc>,
) -> Result<UserId, AccessTokenError> {
    let claims = verify_hs256(token, secret, issuer, now.timestamp())?;
    claims
        .sub
        .parse()
        .map_err(|_| AccessTokenError::Malformed)
}
