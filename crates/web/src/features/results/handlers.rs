use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use storage::{
    Database,
    dto::{
        common::{CreatedResponse, SuccessResponse},
        result::{CreateResultRequest, ResultResponse},
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AdminContext;

use super::services;

#[utoipa::path(
    get,
    path = "/api/results",
    responses(
        (status = 200, description = "All results with their department name", body = Vec<ResultResponse>)
    ),
    tag = "results"
)]
pub async fn list_results(State(db): State<Database>) -> Result<Response, WebError> {
    let results = services::list_results(db.pool()).await?;

    let response: Vec<ResultResponse> = results.into_iter().map(ResultResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/results",
    request_body = CreateResultRequest,
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 201, description = "Result recorded and standings recomputed", body = CreatedResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Department not found")
    ),
    tag = "results"
)]
pub async fn create_result(
    State(db): State<Database>,
    Extension(admin): Extension<AdminContext>,
    WithRejection(Json(req), _): WithRejection<Json<CreateResultRequest>, WebError>,
) -> Result<Response, WebError> {
    req.validate()?;

    let new = req
        .to_new_result()
        .ok_or_else(|| WebError::BadRequest("Incomplete result".to_string()))?;

    let result = services::create_result(db.pool(), &new).await?;
    tracing::info!(
        admin_id = admin.admin_id,
        result_id = result.id,
        department_id = result.department_id,
        points = result.points_awarded,
        "Result recorded"
    );

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(result.id))).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/results/{id}",
    params(
        ("id" = i32, Path, description = "Result id")
    ),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Result deleted and standings recomputed", body = SuccessResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Result not found")
    ),
    tag = "results"
)]
pub async fn delete_result(
    State(db): State<Database>,
    Extension(admin): Extension<AdminContext>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, WebError>,
) -> Result<Response, WebError> {
    services::delete_result(db.pool(), id).await?;
    tracing::info!(admin_id = admin.admin_id, result_id = id, "Result deleted");

    Ok(Json(SuccessResponse::ok()).into_response())
}
