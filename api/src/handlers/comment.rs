use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::AuthUser,
    error::AppResult,
    extract::ValidJson,
    models::{
        comment::{Comment, CreateComment},
        Envelope, ListEnvelope,
    },
    services, AppState,
};

pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidJson(input): ValidJson<CreateComment>,
) -> AppResult<(StatusCode, Json<Envelope<Comment>>)> {
    let comment = services::comment::create(&state.db, &input, auth_user).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(comment, "Create comment successfully")),
    ))
}

pub async fn get_by_pin(
    State(state): State<AppState>,
    Path(pin_id): Path<i64>,
) -> AppResult<Json<ListEnvelope<Comment>>> {
    let comments = services::comment::get_by_pin(&state.db, pin_id).await?;
    Ok(Json(ListEnvelope::new(
        comments,
        "Get comments successfully",
    )))
}
