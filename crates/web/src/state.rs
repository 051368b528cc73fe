use std::sync::Arc;

use axum::extract::FromRef;
use storage::Database;

use crate::config::Config;
use crate::images::ImageStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub images: Arc<dyn ImageStore>,
    pub sessions: SessionSettings,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub ttl: chrono::Duration,
    pub secure_cookie: bool,
}

impl AppState {
    pub fn new(db: Database, images: Arc<dyn ImageStore>, sessions: SessionSettings) -> Self {
        Self {
            db,
            images,
            sessions,
        }
    }
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            ttl: chrono::Duration::seconds(config.session_ttl_secs),
            secure_cookie: config.cookie_secure,
        }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
