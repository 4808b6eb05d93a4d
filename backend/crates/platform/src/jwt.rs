//! HS256 JSON Web Tokens
//!
//! Compact `header.claims.signature` tokens signed with HMAC-SHA256.
//! Only the `HS256` algorithm is accepted on verification.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::crypto::{from_base64_url, to_base64_url};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

impl JwtHeader {
    fn hs256() -> Self {
        Self {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Registered claims carried by access tokens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("signing secret is empty")]
    EmptySecret,
    #[error("invalid signing key")]
    InvalidKey,
    #[error("invalid token format")]
    TokenFormat,
    #[error("invalid base64url encoding")]
    Base64,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlg(String),
    #[error("invalid signature")]
    InvalidSignature,
    #[error("invalid issuer")]
    InvalidIssuer,
    #[error("token expired")]
    Expired,
}

fn b64e_json<T: Serialize>(value: &T) -> Result<String, JwtError> {
    let json = serde_json::to_vec(value)?;
    Ok(to_base64_url(&json))
}

fn b64d_json<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T, JwtError> {
    let bytes = from_base64_url(s).map_err(|_| JwtError::Base64)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn mac_for(secret: &[u8]) -> Result<HmacSha256, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::EmptySecret);
    }
    HmacSha256::new_from_slice(secret).map_err(|_| JwtError::InvalidKey)
}

/// Create an HS256 signed token.
///
/// # Errors
///
/// Returns an error if the secret is empty or the claims cannot be encoded.
pub fn sign_hs256(secret: &[u8], claims: &Claims) -> Result<String, JwtError> {
    let header_b64 = b64e_json(&JwtHeader::hs256())?;
    let claims_b64 = b64e_json(claims)?;
    let signing_input = format!("{header_b64}.{claims_b64}");

    let mut mac = mac_for(secret)?;
    mac.update(signing_input.as_bytes());
    let signature_b64 = to_base64_url(&mac.finalize().into_bytes());

    Ok(format!("{signing_input}.{signature_b64}"))
}

/// Verify an HS256 token and return its claims.
///
/// The signature is checked (in constant time) before the claims are decoded.
/// A token whose `exp` is at or before `now_unix_seconds` is rejected.
pub fn verify_hs256(
    token: &str,
    secret: &[u8],
    expected_issuer: &str,
    now_unix_seconds: i64,
) -> Result<Claims, JwtError> {
    let mut parts = token.split('.');
    let header_b64 = parts.next().ok_or(JwtError::TokenFormat)?;
    let claims_b64 = parts.next().ok_or(JwtError::TokenFormat)?;
    let sig_b64 = parts.next().ok_or(JwtError::TokenFormat)?;
    if parts.next().is_some() {
        return Err(JwtError::TokenFormat);
    }

    let header: JwtHeader = b64d_json(header_b64)?;
    if header.alg != "HS256" {
        return Err(JwtError::UnsupportedAlg(header.alg));
    }

    let signature = from_base64_url(sig_b64).map_err(|_| JwtError::Base64)?;
    let mut mac = mac_for(secret)?;
    mac.update(header_b64.as_bytes());
    mac.update(b".");
    mac.update(claims_b64.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| JwtError::InvalidSignature)?;

    let claims: Claims = b64d_json(claims_b64)?;
    if claims.iss != expected_issuer {
        return Err(JwtError::InvalidIssuer);
    }
    if claims.exp <= now_unix_seconds {
        return Err(JwtError::Expired);
    }

    Ok(claims)
}
