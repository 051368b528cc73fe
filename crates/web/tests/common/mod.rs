//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use scoreboard::images::{ImageStore, LocalImageStore};
use scoreboard::state::{AppState, SessionSettings};
use sqlx::postgres::PgPoolOptions;
use storage::{Database, services::admin_auth};
use tempfile::TempDir;
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const BOUNDARY: &str = "scoreboard-test-boundary";

/// Check constraint some tests add to make media inserts fail. Dropped again
/// whenever a database app is built.
pub const REJECT_CAPTION_CONSTRAINT: &str = "media_test_reject_caption";

/// Tests sharing the database run one at a time.
static DB_LOCK: Mutex<()> = Mutex::const_new(());

pub fn has_test_db() -> bool {
    std::env::var("TEST_DATABASE_URL").is_ok()
}

pub fn test_db_url() -> String {
    std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set for integration tests")
}

pub struct TestApp {
    pub router: Router,
    pub db: Database,
    pub upload_dir: TempDir,
    _guard: Option<MutexGuard<'static, ()>>,
}

fn session_settings() -> SessionSettings {
    SessionSettings {
        ttl: chrono::Duration::hours(1),
        secure_cookie: false,
    }
}

fn build(
    db: Database,
    guard: Option<MutexGuard<'static, ()>>,
    images: Option<Arc<dyn ImageStore>>,
) -> TestApp {
    let upload_dir = tempfile::tempdir().unwrap();
    let images = images.unwrap_or_else(|| Arc::new(LocalImageStore::new(upload_dir.path())));
    let state = AppState::new(db.clone(), images, session_settings());

    TestApp {
        router: scoreboard::app(state, upload_dir.path()),
        db,
        upload_dir,
        _guard: guard,
    }
}

/// An app whose pool never connects. Good for anything the access gate
/// rejects before touching the database.
pub fn app_without_db() -> TestApp {
    let pool = PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(1))
        .connect_lazy("postgres://scoreboard@127.0.0.1:1/unreachable")
        .unwrap();
    build(Database::from_pool(pool), None, None)
}

/// An app on a freshly truncated test database with one admin account.
pub async fn app_with_db() -> TestApp {
    app_with_db_and_images(None).await
}

/// Like [`app_with_db`], optionally storing images somewhere other than the
/// temporary upload directory.
pub async fn app_with_db_and_images(images: Option<Arc<dyn ImageStore>>) -> TestApp {
    let guard = DB_LOCK.lock().await;

    let db = Database::new(&test_db_url())
        .await
        .expect("Failed to connect to test database");
    db.run_migrations().await.unwrap();

    sqlx::raw_sql(
        "TRUNCATE TABLE admin_sessions, admins, results, departments, media RESTART IDENTITY CASCADE",
    )
    .execute(db.pool())
    .await
    .unwrap();

    sqlx::raw_sql(&format!(
        "ALTER TABLE media DROP CONSTRAINT IF EXISTS {REJECT_CAPTION_CONSTRAINT}"
    ))
    .execute(db.pool())
    .await
    .unwrap();

    admin_auth::reset_password(db.pool(), ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .unwrap();

    build(db, Some(guard), images)
}

pub async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, HeaderMap, serde_json::Value) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, headers, json)
}

fn with_cookie(builder: axum::http::request::Builder, cookie: Option<&str>) -> axum::http::request::Builder {
    match cookie {
        Some(cookie) => builder.header(header::COOKIE, cookie),
        None => builder,
    }
}

pub async fn get(app: &TestApp, uri: &str, cookie: Option<&str>) -> (StatusCode, serde_json::Value) {
    let request = with_cookie(Request::builder().uri(uri), cookie)
        .body(Body::empty())
        .unwrap();
    let (status, _, json) = send(app, request).await;
    (status, json)
}

pub async fn send_json(
    app: &TestApp,
    method: &str,
    uri: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let request = with_cookie(
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json"),
        cookie,
    )
    .body(Body::from(body.to_string()))
    .unwrap();
    let (status, _, json) = send(app, request).await;
    (status, json)
}

pub async fn delete(app: &TestApp, uri: &str, cookie: Option<&str>) -> (StatusCode, serde_json::Value) {
    let request = with_cookie(Request::builder().method("DELETE").uri(uri), cookie)
        .body(Body::empty())
        .unwrap();
    let (status, _, json) = send(app, request).await;
    (status, json)
}

/// Multipart body with optional text fields and an optional `image` part.
pub fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn upload(app: &TestApp, body: Vec<u8>, cookie: Option<&str>) -> (StatusCode, serde_json::Value) {
    let request = with_cookie(
        Request::builder()
            .method("POST")
            .uri("/api/media")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ),
        cookie,
    )
    .body(Body::from(body))
    .unwrap();
    let (status, _, json) = send(app, request).await;
    (status, json)
}

/// Log in as the seeded admin and return the `name=value` cookie pair.
pub async fn login(app: &TestApp) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/admin/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD })
                .to_string(),
        ))
        .unwrap();

    let (status, headers, json) = send(app, request).await;
    assert_eq!(status, StatusCode::OK, "login failed: {json}");

    headers
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .expect("login must set a session cookie")
        .to_string()
}

pub fn files_in(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}
