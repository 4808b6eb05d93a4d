//! Password hashing
//!
//! Argon2id PHC strings. The plaintext lives in a buffer that is wiped on
//! drop; an optional application-wide pepper is appended before hashing.

use std::fmt;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password cannot be empty")]
    Empty,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

/// Plaintext password, NFKC-normalized and zeroized on drop
///
/// Carries login attempts as well as new passwords, so no strength policy
/// is applied: an attempt must reach the hash comparison as typed.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: String) -> Result<Self, PasswordHashError> {
        let raw = Zeroizing::new(raw);
        let normalized: String = raw.nfkc().collect();

        if normalized.is_empty() {
            return Err(PasswordHashError::Empty);
        }
        Ok(Self(normalized))
    }

    /// Password bytes followed by the pepper, wiped when dropped
    fn material(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let pepper = pepper.unwrap_or_default();
        let mut bytes = Zeroizing::new(Vec::with_capacity(self.0.len() + pepper.len()));
        bytes.extend_from_slice(self.0.as_bytes());
        bytes.extend_from_slice(pepper);
        bytes
    }

    /// Hash with a fresh 16-byte salt and the argon2 crate defaults
    /// (Argon2id v19, m=19456 KiB, t=2, p=1)
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(&self.material(pepper), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?
            .to_string();

        Ok(HashedPassword { phc })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword([REDACTED])")
    }
}

/// Stored password hash in PHC string form
///
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("correct horse".to_string()).unwrap();
/// let hashed = password.hash(None).unwrap();
/// assert!(hashed.verify(&password, None));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    phc: String,
}

impl HashedPassword {
    /// Accept a PHC string read from storage, rejecting anything unparsable
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = s.into();
        PasswordHash::new(&phc).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { phc })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.phc
    }

    /// Algorithm, version and cost are read from the PHC string itself.
    /// `pepper` must be the one used when hashing.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        PasswordHash::new(&self.phc).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(&password.material(pepper), &parsed)
                .is_ok()
        })
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword([HASH])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(s: &str) -> ClearTextPassword {
        ClearTextPassword::new(s.to_string()).unwrap()
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            ClearTextPassword::new(String::new()),
            Err(PasswordHashError::Empty)
        ));
    }

    #[test]
    fn test_verify_matches_only_same_password() {
        let hashed = password("open-house-2024").hash(None).unwrap();

        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(hashed.verify(&password("open-house-2024"), None));
        assert!(!hashed.verify(&password("open-house-2025"), None));
    }

    #[test]
    fn test_salt_differs_per_hash() {
        let a = password("same").hash(None).unwrap();
        let b = password("same").hash(None).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_pepper_must_match() {
        let pw = password("open-house-2024");
        let hashed = pw.hash(Some(b"pepper-a")).unwrap();

        assert!(hashed.verify(&pw, Some(b"pepper-a")));
        assert!(!hashed.verify(&pw, Some(b"pepper-b")));
        assert!(!hashed.verify(&pw, None));
    }

    #[test]
    fn test_nfkc_equivalent_input_verifies() {
        // U+FF21 FULLWIDTH LATIN CAPITAL LETTER A normalizes to 'A'
        let hashed = password("\u{FF21}bc-secret").hash(None).unwrap();
        assert!(hashed.verify(&password("Abc-secret"), None));
    }

    #[test]
    fn test_stored_string_restores() {
        let pw = password("listing");
        let hashed = pw.hash(None).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&pw, None));
        assert!(HashedPassword::from_phc_string("plaintext-in-db").is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let pw = password("hunter2");
        let hashed = pw.hash(None).unwrap();

        assert!(!format!("{pw:?}").contains("hunter2"));
        assert!(!format!("{hashed:?}").contains("argon2id"));
    }
}
