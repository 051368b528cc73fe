use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use super::handlers::{create_media, delete_media, list_media};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_media))
        .route("/:id", delete(delete_media))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new().route("/", get(list_media)).merge(protected)
}
