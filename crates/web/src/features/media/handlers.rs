use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use storage::{
    Database,
    dto::{
        common::SuccessResponse,
        media::{MediaCreatedResponse, MediaResponse, MediaUploadForm},
    },
};

use crate::error::WebError;
use crate::middleware::auth::AdminContext;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/media",
    responses(
        (status = 200, description = "All media records", body = Vec<MediaResponse>)
    ),
    tag = "media"
)]
pub async fn list_media(State(db): State<Database>) -> Result<Response, WebError> {
    let media = services::list_media(db.pool()).await?;

    let response: Vec<MediaResponse> = media.into_iter().map(MediaResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/media",
    request_body(content = MediaUploadForm, content_type = "multipart/form-data"),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 201, description = "Image stored and media record created", body = MediaCreatedResponse),
        (status = 400, description = "Missing image or invalid form"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Image host failed")
    ),
    tag = "media"
)]
pub async fn create_media(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminContext>,
    WithRejection(mut multipart, _): WithRejection<Multipart, WebError>,
) -> Result<Response, WebError> {
    let form = services::read_upload_form(&mut multipart).await?;
    let media = services::create_media(&state, form).await?;

    tracing::info!(
        admin_id = admin.admin_id,
        media_id = media.id,
        image_path = %media.image_path,
        "Media uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(MediaCreatedResponse {
            success: true,
            id: media.id,
            path: media.image_path,
        }),
    )
        .into_response())
}

#[utoipa::path(
    delete,
    path = "/api/media/{id}",
    params(
        ("id" = i32, Path, description = "Media id")
    ),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Media record deleted", body = SuccessResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Media not found")
    ),
    tag = "media"
)]
pub async fn delete_media(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminContext>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, WebError>,
) -> Result<Response, WebError> {
    services::delete_media(&state, id).await?;
    tracing::info!(admin_id = admin.admin_id, media_id = id, "Media deleted");

    Ok(Json(SuccessResponse::ok()).into_response())
}
