//! Auth Middleware
//!
//! Gate for protected routes:
//! `route_layer(from_fn_with_state(state, require_auth::<R>))`.
//! On success the [`AuthenticatedUser`] is available as a request extension.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::{AuthenticatedUser, CheckSessionUseCase};
use crate::domain::repository::{TokenStore, UserRepository};
use crate::presentation::cookies::PresentedTokens;
use crate::presentation::handlers::AuthAppState;

/// Set on 401 responses from the gate
pub const AUTH_REQUIRED_HEADER: &str = "X-Auth-Required";

/// Middleware that requires the access token cookie and a matching
/// `X-CSRF-TOKEN` header. Cookies are left untouched on rejection so the
/// client can still refresh.
pub async fn require_auth<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: UserRepository + TokenStore + Clone + Send + Sync + 'static,
{
    let presented = PresentedTokens::from_headers(req.headers());

    let use_case =
        CheckSessionUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    match use_case
        .authorize(
            presented.access_token.as_deref(),
            presented.csrf_header.as_deref(),
        )
        .await
    {
        Ok(user) => {
            req.extensions_mut().insert::<AuthenticatedUser>(user);
            next.run(req).await
        }
        Err(e) if e.is_auth_failure() => ([(AUTH_REQUIRED_HEADER, "true")], e).into_response(),
        Err(e) => e.into_response(),
    }
}
