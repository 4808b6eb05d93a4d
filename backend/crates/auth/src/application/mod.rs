//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod issue_session;
pub mod refresh_session;
pub mod sign_in;
pub mod sign_out;
pub mod verify_credentials;

// Re-exports
pub use check_session::{AuthenticatedUser, CheckSessionUseCase};
pub use config::{AuthConfig, Environment};
pub use refresh_session::RefreshSessionUseCase;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use verify_credentials::CredentialVerifier;
