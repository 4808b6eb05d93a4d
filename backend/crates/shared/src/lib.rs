//! Shared Kernel
//!
//! Vocabulary every crate in the backend agrees on:
//! - [`error::app_error::AppError`], the single error shape rendered to clients
//! - [`id::Id`], UUID identifiers tagged with the entity they name
//!
//! Database and HTTP integrations sit behind the `sqlx` and `axum` features
//! so that pure domain code can depend on this crate without either.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
