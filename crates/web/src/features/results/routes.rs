use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use super::handlers::{create_result, delete_result, list_results};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_result))
        .route("/:id", delete(delete_result))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/", get(list_results))
        .merge(protected)
}
