//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Length in bytes of the random part of opaque tokens
pub const OPAQUE_TOKEN_BYTES: usize = 32;

/// The operating system entropy source could not be read
#[derive(Debug, Error)]
#[error("System randomness unavailable: {0}")]
pub struct RandomnessError(#[from] rand::Error);

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Result<Vec<u8>, RandomnessError> {
    let mut bytes = vec![0u8; len];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(bytes)
}

/// Generate an opaque token: [`OPAQUE_TOKEN_BYTES`] random bytes, URL-safe Base64 without padding
pub fn random_token() -> Result<String, RandomnessError> {
    let bytes = random_bytes(OPAQUE_TOKEN_BYTES)?;
    Ok(to_base64_url(&bytes))
}

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Encode bytes as URL-safe Base64 without padding
pub fn to_base64_url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode URL-safe Base64 without padding
pub fn from_base64_url(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::URL_SAFE_NO_PAD.decode(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_values() {
        // SHA-256 of empty string
        let hash = sha256(b"");
        let expected =
            hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
                .unwrap();
        assert_eq!(hash.to_vec(), expected);

        // SHA-256 of "hello"
        let hash = sha256(b"hello");
        let expected =
            hex::decode("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")
                .unwrap();
        assert_eq!(hash.to_vec(), expected);
    }

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32).unwrap();
        assert_eq!(bytes.len(), 32);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_random_token_shape() {
        let token = random_token().unwrap();
        // 32 bytes -> 43 chars unpadded
        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_eq!(from_base64_url(&token).unwrap().len(), OPAQUE_TOKEN_BYTES);
    }

    #[test]
    fn test_random_tokens_differ() {
        assert_ne!(random_token().unwrap(), random_token().unwrap());
    }
}
