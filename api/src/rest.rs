use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::auth::middleware::{require_auth, require_pin_author};
use crate::handlers;
use crate::AppState;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn router(state: AppState) -> Router {
    let upload_limit = state.config.upload_max_bytes + MULTIPART_OVERHEAD;

    let public = Router::new()
        .route("/auth/sign-in", post(handlers::auth::sign_in))
        .route("/auth/sign-up", post(handlers::auth::sign_up))
        .route("/pin", get(handlers::pin::get_all))
        .route("/pin/pagination", get(handlers::pin::get_pagination))
        .route("/pin/:id", get(handlers::pin::get_by_id))
        .route("/comment/pin/:id", get(handlers::comment::get_by_pin));

    let protected = Router::new()
        .route("/user/profile", get(handlers::user::profile))
        .route("/pin/create", post(handlers::pin::create))
        .route("/pin/save/:id", post(handlers::pin::save))
        .route("/pin/created", get(handlers::pin::get_created))
        .route("/pin/saved", get(handlers::pin::get_saved))
        .route(
            "/pin/:id",
            patch(handlers::pin::update)
                .delete(handlers::pin::delete)
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_pin_author,
                )),
        )
        .route("/comment/create", post(handlers::comment::create))
        .route(
            "/file/upload",
            post(handlers::file::upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
