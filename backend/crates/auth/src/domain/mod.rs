//! Domain Layer
//!
//! Contains entities, value objects, repository traits and token services.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{
    csrf_token::CsrfToken, refresh_token::RefreshToken, session::IssuedSession, user::User,
};
pub use repository::{TokenStore, UserRepository};
