//! Access gate for mutating endpoints.
//!
//! The admin session id travels in an HttpOnly cookie; the matching
//! `admin_sessions` row is the source of truth. Protected routes receive the
//! resolved [`AdminContext`] as a request extension.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use storage::{Database, error::StorageError, repository::session::SessionRepository};

use crate::error::WebError;
use crate::state::SessionSettings;

pub const SESSION_COOKIE: &str = "scoreboard_session";

/// The authenticated admin behind the current request.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub admin_id: i32,
}

/// Resolve the session cookie to a live admin session, if any.
pub async fn current_admin(
    db: &Database,
    jar: &CookieJar,
) -> Result<Option<AdminContext>, StorageError> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };

    let session = SessionRepository::new(db.pool())
        .find_active(cookie.value())
        .await?;

    Ok(session.map(|s| AdminContext {
        admin_id: s.admin_id,
    }))
}

pub async fn is_admin_authenticated(db: &Database, jar: &CookieJar) -> bool {
    match current_admin(db, jar).await {
        Ok(admin) => admin.is_some(),
        Err(e) => {
            tracing::error!("Session lookup failed: {}", e);
            false
        }
    }
}

pub async fn require_admin(
    State(db): State<Database>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    match current_admin(&db, &jar).await? {
        Some(admin) => {
            request.extensions_mut().insert(admin);
            Ok(next.run(request).await)
        }
        None => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "Rejected unauthenticated admin request"
            );
            Err(WebError::Unauthorized)
        }
    }
}

pub fn session_cookie(session_id: String, settings: &SessionSettings) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure_cookie)
        .build()
}

pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let settings = SessionSettings {
            ttl: chrono::Duration::hours(1),
            secure_cookie: true,
        };

        let cookie = session_cookie("abc123".to_string(), &settings);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "abc123");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }
}
