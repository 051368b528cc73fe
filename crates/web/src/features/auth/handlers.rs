use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{CookieJar, WithRejection};
use storage::{
    Database,
    dto::{
        auth::{AuthStatusResponse, LoginRequest},
        common::MessageResponse,
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::{
    SESSION_COOKIE, expired_session_cookie, is_admin_authenticated, session_cookie,
};
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials", body = MessageResponse)
    ),
    tag = "admin"
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, WebError>,
) -> Result<Response, WebError> {
    req.validate()?;

    let session = services::login(&state.db, &state.sessions, &req.username, &req.password).await?;

    match session {
        Some(session) => {
            tracing::info!(admin_id = session.admin_id, "Admin logged in");
            let jar = jar.add(session_cookie(session.session_id, &state.sessions));
            Ok((jar, Json(MessageResponse::success("Login successful"))).into_response())
        }
        None => {
            tracing::warn!(username = %req.username, "Invalid admin credentials");
            Ok((
                StatusCode::UNAUTHORIZED,
                Json(MessageResponse::failure("Invalid credentials")),
            )
                .into_response())
        }
    }
}

#[utoipa::path(
    post,
    path = "/admin/logout",
    responses(
        (status = 200, description = "Session ended", body = MessageResponse)
    ),
    tag = "admin"
)]
pub async fn logout(State(db): State<Database>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE)
        && let Err(e) = services::logout(&db, cookie.value()).await
    {
        tracing::warn!("Failed to delete admin session: {}", e);
    }

    (
        jar.remove(expired_session_cookie()),
        Json(MessageResponse::success("Logged out successfully")),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/admin/check",
    responses(
        (status = 200, description = "Session is authenticated", body = AuthStatusResponse),
        (status = 401, description = "No authenticated session", body = AuthStatusResponse)
    ),
    tag = "admin"
)]
pub async fn check(State(db): State<Database>, jar: CookieJar) -> Response {
    if is_admin_authenticated(&db, &jar).await {
        Json(AuthStatusResponse {
            authenticated: true,
        })
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(AuthStatusResponse {
                authenticated: false,
            }),
        )
            .into_response()
    }
}
