use chrono::{Duration, Utc};
use sqlx::PgPool;

use crate::error::Result;
use crate::models::AdminSession;

pub struct SessionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SessionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, session_id: &str, admin_id: i32, ttl: Duration) -> Result<AdminSession> {
        let now = Utc::now();

        let session = sqlx::query_as::<_, AdminSession>(
            r#"
            INSERT INTO admin_sessions (session_id, admin_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING session_id, admin_id, created_at, expires_at
            "#,
        )
        .bind(session_id)
        .bind(admin_id)
        .bind(now)
        .bind(now + ttl)
        .fetch_one(self.pool)
        .await?;

        Ok(session)
    }

    /// Look up a session, dropping it if it has expired.
    pub async fn find_active(&self, session_id: &str) -> Result<Option<AdminSession>> {
        let session = sqlx::query_as::<_, AdminSession>(
            r#"
            SELECT session_id, admin_id, created_at, expires_at
            FROM admin_sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(self.pool)
        .await?;

        match session {
            Some(session) if session.is_expired_at(Utc::now()) => {
                self.delete(session_id).await?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    pub async fn delete(&self, session_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM admin_sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    pub async fn purge_expired(&self) -> Result<u64> {
        let purged = sqlx::query("DELETE FROM admin_sessions WHERE expires_at <= $1")
            .bind(Utc::now())
            .execute(self.pool)
            .await?;

        Ok(purged.rows_affected())
    }
}
