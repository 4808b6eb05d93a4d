//! Application Configuration
//!
//! Configuration for the Auth application layer. One value is built at
//! startup and shared (`Arc`) by every use case, handler and middleware.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use thiserror::Error;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Cookie domain used in development
pub const DEVELOPMENT_COOKIE_DOMAIN: &str = "localhost";

/// Deployment mode; controls cookie `Secure`/`Domain`/`SameSite`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl FromStr for Environment {
    type Err = std::convert::Infallible;

    /// `dev`/`development` (any case); everything else is production
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            _ => Ok(Environment::Production),
        }
    }
}

/// Configuration errors detected at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("token secret must not be empty")]
    EmptyTokenSecret,
    #[error("cookie domain is required in production")]
    MissingCookieDomain,
}

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Deployment mode
    pub environment: Environment,
    /// HS256 signing key for access tokens
    pub token_secret: Vec<u8>,
    /// `iss` claim written and required on access tokens
    pub token_issuer: String,
    /// Access token (and `token` cookie) lifetime (1 hour)
    pub access_token_ttl: Duration,
    /// Refresh token (and `refreshToken`/`csrfToken` cookie) lifetime (30 days)
    pub refresh_token_ttl: Duration,
    /// `Domain` attribute of session cookies
    pub cookie_domain: Option<String>,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    pub const DEFAULT_ISSUER: &'static str = "realty-api";

    /// Build the configuration for a deployment mode.
    ///
    /// Development: `Secure` off, `SameSite=Lax`, domain `localhost`.
    /// Production: `Secure` on, `SameSite=Strict`, `cookie_domain` required.
    pub fn for_environment(
        environment: Environment,
        token_secret: Vec<u8>,
        cookie_domain: Option<String>,
    ) -> Result<Self, ConfigError> {
        if token_secret.is_empty() {
            return Err(ConfigError::EmptyTokenSecret);
        }

        let cookie_domain = cookie_domain
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let (cookie_domain, cookie_secure, cookie_same_site) = match environment {
            Environment::Development => (
                Some(cookie_domain.unwrap_or_else(|| DEVELOPMENT_COOKIE_DOMAIN.to_string())),
                false,
                SameSite::Lax,
            ),
            Environment::Production => (
                Some(cookie_domain.ok_or(ConfigError::MissingCookieDomain)?),
                true,
                SameSite::Strict,
            ),
        };

        Ok(Self {
            environment,
            token_secret,
            token_issuer: Self::DEFAULT_ISSUER.to_string(),
            access_token_ttl: Duration::hours(1),
            refresh_token_ttl: Duration::days(30),
            cookie_domain,
            cookie_secure,
            cookie_same_site,
            password_pepper: None,
        })
    }

    /// Set the password pepper
    pub fn with_pepper(mut self, pepper: Option<Vec<u8>>) -> Self {
        self.password_pepper = pepper.filter(|p| !p.is_empty());
        self
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Access token cookie Max-Age in seconds
    pub fn access_token_max_age_secs(&self) -> i64 {
        self.access_token_ttl.num_seconds()
    }

    /// Refresh/csrf cookie Max-Age in seconds
    pub fn refresh_token_max_age_secs(&self) -> i64 {
        self.refresh_token_ttl.num_seconds()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("environment", &self.environment)
            .field("token_secret", &"[REDACTED]")
            .field("token_issuer", &self.token_issuer)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("cookie_domain", &self.cookie_domain)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!("dev".parse::<Environment>(), Ok(Environment::Development));
        assert_eq!("Development".parse::<Environment>(), Ok(Environment::Development));
        assert_eq!("production".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("staging".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("".parse::<Environment>(), Ok(Environment::Production));
    }

    #[test]
    fn test_development_cookies() {
        let config =
            AuthConfig::for_environment(Environment::Development, b"secret".to_vec(), None)
                .unwrap();
        assert!(!config.cookie_secure);
        assert_eq!(config.cookie_same_site, SameSite::Lax);
        assert_eq!(config.cookie_domain.as_deref(), Some("localhost"));
    }

    #[test]
    fn test_production_cookies() {
        let config = AuthConfig::for_environment(
            Environment::Production,
            b"secret".to_vec(),
            Some("soldbyghost.com".to_string()),
        )
        .unwrap();
        assert!(config.cookie_secure);
        assert_eq!(config.cookie_same_site, SameSite::Strict);
        assert_eq!(config.cookie_domain.as_deref(), Some("soldbyghost.com"));
    }

    #[test]
    fn test_production_requires_domain() {
        assert_eq!(
            AuthConfig::for_environment(Environment::Production, b"secret".to_vec(), None)
                .unwrap_err(),
            ConfigError::MissingCookieDomain
        );
        assert_eq!(
            AuthConfig::for_environment(
                Environment::Production,
                b"secret".to_vec(),
                Some("  ".to_string())
            )
            .unwrap_err(),
            ConfigError::MissingCookieDomain
        );
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert_eq!(
            AuthConfig::for_environment(Environment::Development, Vec::new(), None).unwrap_err(),
            ConfigError::EmptyTokenSecret
        );
    }

    #[test]
    fn test_default_ttls() {
        let config =
            AuthConfig::for_environment(Environment::Development, b"secret".to_vec(), None)
                .unwrap();
        assert_eq!(config.access_token_max_age_secs(), 3600);
        assert_eq!(config.refresh_token_max_age_secs(), 30 * 24 * 3600);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config =
            AuthConfig::for_environment(Environment::Development, b"hunter2".to_vec(), None)
                .unwrap()
                .with_pepper(Some(b"pepper".to_vec()));
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("REDACTED"));
    }
}
