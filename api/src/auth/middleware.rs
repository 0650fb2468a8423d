use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::{AppError, AppResult};
use crate::services;
use crate::state::AppState;

/// Identity of the caller, attached by [`require_auth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))
    }
}

/// Rejects requests without a valid bearer token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".into()))?;
    let user_id = state.jwt.verify(token)?;

    req.extensions_mut().insert(AuthUser { user_id });
    Ok(next.run(req).await)
}

/// Lets the request through only when the caller authored the pin in the path.
pub async fn require_pin_author(
    State(state): State<AppState>,
    Path(pin_id): Path<i64>,
    auth_user: AuthUser,
    req: Request,
    next: Next,
) -> AppResult<Response> {
    services::pin::ensure_author(&state.db, pin_id, auth_user).await?;
    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
