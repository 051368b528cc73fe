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
        department::{DepartmentRequest, DepartmentResponse},
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AdminContext;

use super::services;

#[utoipa::path(
    get,
    path = "/api/departments",
    responses(
        (status = 200, description = "Departments ordered by rank", body = Vec<DepartmentResponse>)
    ),
    tag = "departments"
)]
pub async fn list_departments(State(db): State<Database>) -> Result<Response, WebError> {
    let departments = services::list_departments(db.pool()).await?;

    let response: Vec<DepartmentResponse> = departments
        .into_iter()
        .map(DepartmentResponse::from)
        .collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/departments",
    request_body = DepartmentRequest,
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 201, description = "Department created and standings recomputed", body = CreatedResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "A department with this name already exists")
    ),
    tag = "departments"
)]
pub async fn create_department(
    State(db): State<Database>,
    Extension(admin): Extension<AdminContext>,
    WithRejection(Json(req), _): WithRejection<Json<DepartmentRequest>, WebError>,
) -> Result<Response, WebError> {
    req.validate()?;

    let department = services::create_department(db.pool(), &req).await?;
    tracing::info!(
        admin_id = admin.admin_id,
        department_id = department.id,
        "Department created"
    );

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(department.id))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/departments/{id}",
    params(
        ("id" = i32, Path, description = "Department id")
    ),
    request_body = DepartmentRequest,
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Department renamed", body = SuccessResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Department not found"),
        (status = 409, description = "A department with this name already exists")
    ),
    tag = "departments"
)]
pub async fn update_department(
    State(db): State<Database>,
    Extension(admin): Extension<AdminContext>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, WebError>,
    WithRejection(Json(req), _): WithRejection<Json<DepartmentRequest>, WebError>,
) -> Result<Response, WebError> {
    req.validate()?;

    services::rename_department(db.pool(), id, &req).await?;
    tracing::info!(admin_id = admin.admin_id, department_id = id, "Department renamed");

    Ok(Json(SuccessResponse::ok()).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/departments/{id}",
    params(
        ("id" = i32, Path, description = "Department id")
    ),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Department and its results deleted", body = SuccessResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Department not found")
    ),
    tag = "departments"
)]
pub async fn delete_department(
    State(db): State<Database>,
    Extension(admin): Extension<AdminContext>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, WebError>,
) -> Result<Response, WebError> {
    services::delete_department(db.pool(), id).await?;
    tracing::info!(admin_id = admin.admin_id, department_id = id, "Department deleted");

    Ok(Json(SuccessResponse::ok()).into_response())
}
