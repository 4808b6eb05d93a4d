//! HTTP Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::{Extension, Json};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    AuthenticatedUser, CheckSessionUseCase, RefreshSessionUseCase, SignInInput, SignInUseCase,
    SignOutUseCase,
};
use crate::domain::repository::{TokenStore, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::cookies::{PresentedTokens, cleared_cookies, session_cookies};
use crate::presentation::dto::{LoginRequest, SessionResponse};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + TokenStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
///
/// 204 with three cookies; no cookies on any failure.
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + TokenStore + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected login body");
        AuthError::BadRequest("Malformed request body")
    })?;

    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let session = use_case
        .execute(SignInInput {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::NO_CONTENT,
        AppendHeaders(session_cookies(&state.config, &session)),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
///
/// Cookies are cleared whatever the outcome.
pub async fn logout<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> Response
where
    R: UserRepository + TokenStore + Clone + Send + Sync + 'static,
{
    let presented = PresentedTokens::from_headers(&headers);
    let cleared = AppendHeaders(cleared_cookies(&state.config));

    let use_case = SignOutUseCase::new(state.repo.clone());

    match use_case
        .execute(
            presented.refresh_token.as_deref(),
            presented.csrf_cookie.as_deref(),
        )
        .await
    {
        Ok(()) => (StatusCode::NO_CONTENT, cleared).into_response(),
        Err(e) => (cleared, e).into_response(),
    }
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/auth/refresh
///
/// New cookies on success; every failure clears them.
pub async fn refresh<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> Response
where
    R: UserRepository + TokenStore + Clone + Send + Sync + 'static,
{
    let presented = PresentedTokens::from_headers(&headers);

    let use_case =
        RefreshSessionUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    match use_case
        .execute(
            presented.refresh_token.as_deref(),
            presented.csrf_cookie.as_deref(),
        )
        .await
    {
        Ok(session) => (
            StatusCode::NO_CONTENT,
            AppendHeaders(session_cookies(&state.config, &session)),
        )
            .into_response(),
        Err(e) => (AppendHeaders(cleared_cookies(&state.config)), e).into_response(),
    }
}

// ============================================================================
// Validate
// ============================================================================

/// POST /api/auth/validate
///
/// 204 if the access token cookie is valid and its user exists.
pub async fn validate<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<StatusCode>
where
    R: UserRepository + TokenStore + Clone + Send + Sync + 'static,
{
    let presented = PresentedTokens::from_headers(&headers);

    let use_case =
        CheckSessionUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    use_case.validate(presented.access_token.as_deref()).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Current Session (behind `require_auth`)
// ============================================================================

/// GET /api/auth/session
pub async fn current_session(Extension(user): Extension<AuthenticatedUser>) -> Json<SessionResponse> {
    Json(SessionResponse::from(user))
}
