use axum::{extract::State, Json};

use crate::{
    auth::AuthUser,
    error::AppResult,
    models::{user::User, Envelope},
    services, AppState,
};

pub async fn profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Envelope<User>>> {
    let user = services::user::profile(&state.db, auth_user).await?;
    Ok(Json(Envelope::new(user, "Get profile successfully")))
}
