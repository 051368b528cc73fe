use std::path::Path;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{Method, header},
    routing::get,
};
use serde_json::{Value, json};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod features;
pub mod images;
pub mod middleware;
pub mod openapi;
pub mod state;

use features::{auth, departments, media, results};
use state::AppState;

/// Largest accepted request body, sized for photo uploads.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Build the HTTP application. `upload_dir` is served under `/uploads`.
pub fn app(state: AppState, upload_dir: impl AsRef<Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health))
        .nest("/admin", auth::routes::routes())
        .nest("/api/departments", departments::routes::routes(state.clone()))
        .nest("/api/results", results::routes::routes(state.clone()))
        .nest("/api/media", media::routes::routes(state.clone()))
        .nest_service("/uploads", ServeDir::new(upload_dir.as_ref()))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
