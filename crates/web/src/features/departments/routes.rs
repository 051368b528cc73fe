use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{create_department, delete_department, list_departments, update_department};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_department))
        .route("/:id", put(update_department).delete(delete_department))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/", get(list_departments))
        .merge(protected)
}
