use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::AuthUser,
    error::AppResult,
    extract::{ValidJson, ValidQuery},
    models::{
        pin::{CreatePin, Pin, PinPaginationQuery, PinQuery, SavedPin, UpdatePin},
        Envelope, ListEnvelope,
    },
    services::{self, pin::SaveOutcome},
    AppState,
};

pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidJson(input): ValidJson<CreatePin>,
) -> AppResult<(StatusCode, Json<Envelope<Pin>>)> {
    let pin = services::pin::create(&state.db, &input, auth_user).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(pin, "Create pin successfully")),
    ))
}

pub async fn save(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<Option<SavedPin>>>> {
    let envelope = match services::pin::save(&state.db, id, auth_user).await? {
        SaveOutcome::Saved(saved) => Envelope::new(Some(saved), "Save pin successfully"),
        SaveOutcome::Removed => Envelope::new(None, "Unsave pin successfully"),
    };
    Ok(Json(envelope))
}

pub async fn get_all(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<PinQuery>,
) -> AppResult<Json<ListEnvelope<Pin>>> {
    let pins = services::pin::get_all(&state.db, &query).await?;
    Ok(Json(ListEnvelope::new(pins, "Get all pins successfully")))
}

pub async fn get_pagination(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<PinPaginationQuery>,
) -> AppResult<Json<ListEnvelope<Pin>>> {
    let pins = services::pin::get_pagination(&state.db, &query).await?;
    Ok(Json(ListEnvelope::new(
        pins,
        "Get pagination pins successfully",
    )))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<Pin>>> {
    let pin = services::pin::get_by_id(&state.db, id).await?;
    Ok(Json(Envelope::new(pin, "Get pin successfully")))
}

pub async fn get_created(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ListEnvelope<Pin>>> {
    let pins = services::pin::get_created_pins(&state.db, auth_user).await?;
    Ok(Json(ListEnvelope::new(
        pins,
        "Get created pins successfully",
    )))
}

pub async fn get_saved(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ListEnvelope<Pin>>> {
    let pins = services::pin::get_saved_pins(&state.db, auth_user).await?;
    Ok(Json(ListEnvelope::new(pins, "Get saved pins successfully")))
}

// Authorship is enforced by `require_pin_author` on these routes.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidJson(patch): ValidJson<UpdatePin>,
) -> AppResult<Json<Envelope<Pin>>> {
    let pin = services::pin::update(&state.db, id, &patch).await?;
    Ok(Json(Envelope::new(pin, "Update pin successfully")))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<Option<()>>>> {
    services::pin::delete(&state.db, id).await?;
    Ok(Json(Envelope::new(None, "Delete pin successfully")))
}
