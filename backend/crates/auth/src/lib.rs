//! Auth (Authentication) Backend Module
//!
//! Session & credential lifecycle for the realty API.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, token services
//! - `application/` - Use cases (sign in, gate, refresh, sign out) and config
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, cookies, DTOs, router, middleware
//!
//! ## Session Model
//! - `token`: HS256 access token, 1 hour, HttpOnly
//! - `refreshToken`: opaque, 30 days, HttpOnly, single use
//! - `csrfToken`: opaque, 30 days, readable by script and echoed in
//!   `X-CSRF-TOKEN` (double submit)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Opaque tokens stored as SHA-256 digests only
//! - Refresh rotation consumes the presented token atomically
//! - Multiple concurrent sessions per user are allowed

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AuthConfig, Environment};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
