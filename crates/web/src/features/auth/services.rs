use storage::{
    Database, error::Result, models::AdminSession, repository::session::SessionRepository,
    services::admin_auth,
};

use crate::state::SessionSettings;

/// Verify credentials and open a session.
pub async fn login(
    db: &Database,
    settings: &SessionSettings,
    username: &str,
    password: &str,
) -> Result<Option<AdminSession>> {
    admin_auth::authenticate(db.pool(), username, password, settings.ttl).await
}

/// End a session. Unknown ids are ignored.
pub async fn logout(db: &Database, session_id: &str) -> Result<()> {
    SessionRepository::new(db.pool()).delete(session_id).await
}
