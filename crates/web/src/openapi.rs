use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};

use crate::features;
use crate::middleware::auth::SESSION_COOKIE;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::auth::handlers::login,
        features::auth::handlers::logout,
        features::auth::handlers::check,
        features::departments::handlers::list_departments,
        features::departments::handlers::create_department,
        features::departments::handlers::update_department,
        features::departments::handlers::delete_department,
        features::results::handlers::list_results,
        features::results::handlers::create_result,
        features::results::handlers::delete_result,
        features::media::handlers::list_media,
        features::media::handlers::create_media,
        features::media::handlers::delete_media,
    ),
    components(
        schemas(
            storage::dto::auth::LoginRequest,
            storage::dto::auth::AuthStatusResponse,
            storage::dto::common::MessageResponse,
            storage::dto::common::SuccessResponse,
            storage::dto::common::CreatedResponse,
            storage::dto::department::DepartmentRequest,
            storage::dto::department::DepartmentResponse,
            storage::dto::result::CreateResultRequest,
            storage::dto::result::ResultResponse,
            storage::dto::media::MediaResponse,
            storage::dto::media::MediaCreatedResponse,
            storage::dto::media::MediaUploadForm,
            storage::models::EventType,
            storage::models::MediaType,
        )
    ),
    tags(
        (name = "admin", description = "Admin session endpoints"),
        (name = "departments", description = "Departments and standings"),
        (name = "results", description = "Event results"),
        (name = "media", description = "Event and winner photos"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/admin/login",
            "/admin/logout",
            "/admin/check",
            "/api/departments",
            "/api/departments/{id}",
            "/api/results",
            "/api/results/{id}",
            "/api/media",
            "/api/media/{id}",
        ] {
            assert!(paths.contains(&path), "missing {path}");
        }
    }
}
