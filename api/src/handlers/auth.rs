use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppError,
    extract::ValidJson,
    models::{
        user::{AuthResponse, SignInPayload, SignUpPayload, User},
        Envelope,
    },
    services, AppState,
};

pub async fn sign_up(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<SignUpPayload>,
) -> Result<(StatusCode, Json<Envelope<User>>), AppError> {
    let user = services::auth::sign_up(&state.db, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(user, "Sign up successfully")),
    ))
}

pub async fn sign_in(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<SignInPayload>,
) -> Result<Json<Envelope<AuthResponse>>, AppError> {
    let token = services::auth::sign_in(&state.db, &state.jwt, &payload).await?;

    Ok(Json(Envelope::new(
        AuthResponse { token },
        "Sign in successfully",
    )))
}
