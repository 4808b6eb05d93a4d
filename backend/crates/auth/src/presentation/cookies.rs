//! Session Cookies
//!
//! | Cookie | TTL | HttpOnly |
//! |---|---|---|
//! | `token` | access token TTL | yes |
//! | `refreshToken` | refresh token TTL | yes |
//! | `csrfToken` | refresh token TTL | no (echoed in `X-CSRF-TOKEN`) |

use axum::http::{HeaderMap, HeaderName, header};
use platform::cookie::{CookieConfig, extract_cookie, extract_header};

use crate::application::config::AuthConfig;
use crate::domain::entity::session::IssuedSession;

pub const ACCESS_TOKEN_COOKIE: &str = "token";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";
pub const CSRF_TOKEN_COOKIE: &str = "csrfToken";
pub const CSRF_HEADER: &str = "X-CSRF-TOKEN";

/// Three `Set-Cookie` headers, for `AppendHeaders`
pub type SessionCookieHeaders = [(HeaderName, String); 3];

fn cookie(config: &AuthConfig, name: &str, http_only: bool, max_age_secs: i64) -> CookieConfig {
    CookieConfig {
        name: name.to_string(),
        secure: config.cookie_secure,
        http_only,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        domain: config.cookie_domain.clone(),
        max_age_secs: Some(max_age_secs),
    }
}

fn access_cookie(config: &AuthConfig) -> CookieConfig {
    cookie(config, ACCESS_TOKEN_COOKIE, true, config.access_token_max_age_secs())
}

fn refresh_cookie(config: &AuthConfig) -> CookieConfig {
    cookie(config, REFRESH_TOKEN_COOKIE, true, config.refresh_token_max_age_secs())
}

fn csrf_cookie(config: &AuthConfig) -> CookieConfig {
    cookie(config, CSRF_TOKEN_COOKIE, false, config.refresh_token_max_age_secs())
}

/// Cookies carrying a freshly issued session
pub fn session_cookies(config: &AuthConfig, session: &IssuedSession) -> SessionCookieHeaders {
    [
        (
            header::SET_COOKIE,
            access_cookie(config).build_set_cookie(&session.access_token),
        ),
        (
            header::SET_COOKIE,
            refresh_cookie(config).build_set_cookie(&session.refresh_token),
        ),
        (
            header::SET_COOKIE,
            csrf_cookie(config).build_set_cookie(&session.csrf_token),
        ),
    ]
}

/// Cookies expiring all three session cookies
pub fn cleared_cookies(config: &AuthConfig) -> SessionCookieHeaders {
    [
        (header::SET_COOKIE, access_cookie(config).build_delete_cookie()),
        (header::SET_COOKIE, refresh_cookie(config).build_delete_cookie()),
        (header::SET_COOKIE, csrf_cookie(config).build_delete_cookie()),
    ]
}

/// Credentials presented by a request
#[derive(Default)]
pub struct PresentedTokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub csrf_cookie: Option<String>,
    pub csrf_header: Option<String>,
}

impl PresentedTokens {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            access_token: extract_cookie(headers, ACCESS_TOKEN_COOKIE),
            refresh_token: extract_cookie(headers, REFRESH_TOKEN_COOKIE),
            csrf_cookie: extract_cookie(headers, CSRF_TOKEN_COOKIE),
            csrf_header: extract_header(headers, CSRF_HEADER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::Environment;
    use crate::application::issue_session::issue_session;
    use crate::domain::value_object::user_id::UserId;
    use axum::http::HeaderValue;
    use chrono::Utc;

    fn production_config() -> AuthConfig {
        AuthConfig::for_environment(
            Environment::Production,
            b"cookie-test-secret".to_vec(),
            Some("soldbyghost.com".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn test_session_cookie_attributes() {
        let config = production_config();
        let session = issue_session(&config, UserId::new(), Utc::now()).unwrap();
        let [(_, access), (_, refresh), (_, csrf)] = session_cookies(&config, &session);

        assert!(access.starts_with(&format!("token={}", session.access_token)));
        assert!(access.contains("HttpOnly"));
        assert!(access.contains("Max-Age=3600"));

        assert!(refresh.starts_with(&format!("refreshToken={}", session.refresh_token)));
        assert!(refresh.contains("HttpOnly"));
        assert!(refresh.contains("Max-Age=2592000"));

        assert!(csrf.starts_with(&format!("csrfToken={}", session.csrf_token)));
        assert!(!csrf.contains("HttpOnly"));
        assert!(csrf.contains("Max-Age=2592000"));

        for cookie in [&access, &refresh, &csrf] {
            assert!(cookie.contains("Path=/"));
            assert!(cookie.contains("Domain=soldbyghost.com"));
            assert!(cookie.contains("Secure"));
            assert!(cookie.contains("SameSite=Strict"));
        }
    }

    #[test]
    fn test_development_cookies_not_secure() {
        let config =
            AuthConfig::for_environment(Environment::Development, b"s".to_vec(), None).unwrap();
        for (_, cookie) in cleared_cookies(&config) {
            assert!(!cookie.contains("Secure"));
            assert!(cookie.contains("SameSite=Lax"));
            assert!(cookie.contains("Domain=localhost"));
        }
    }

    #[test]
    fn test_cleared_cookies() {
        let config = production_config();
        let cleared = cleared_cookies(&config);
        let names: Vec<&str> = cleared
            .iter()
            .map(|(_, c)| c.split('=').next().unwrap())
            .collect();
        assert_eq!(names, ["token", "refreshToken", "csrfToken"]);

        for (name, cookie) in &cleared {
            assert_eq!(*name, header::SET_COOKIE);
            assert!(cookie.contains("Max-Age=0"));
        }
    }

    #[test]
    fn test_presented_tokens() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("token=a; refreshToken=b; csrfToken=c"),
        );
        headers.insert("x-csrf-token", HeaderValue::from_static("c"));

        let presented = PresentedTokens::from_headers(&headers);
        assert_eq!(presented.access_token.as_deref(), Some("a"));
        assert_eq!(presented.refresh_token.as_deref(), Some("b"));
        assert_eq!(presented.csrf_cookie.as_deref(), Some("c"));
        assert_eq!(presented.csrf_header.as_deref(), Some("c"));

        let presented = PresentedTokens::from_headers(&HeaderMap::new());
        assert!(presented.access_token.is_none());
        assert!(presented.csrf_header.is_none());
    }
}
