use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{check, login, logout};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/check", get(check))
}
