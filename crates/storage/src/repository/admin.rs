use sqlx::PgPool;

use crate::error::Result;
use crate::models::Admin;

pub struct AdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, username, password_hash FROM admins WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(admin)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Store a password hash for `username`, creating the admin if needed.
    pub async fn upsert_password_hash(&self, username: &str, password_hash: &str) -> Result<Admin> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (username, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (username) DO UPDATE SET password_hash = EXCLUDED.password_hash
            RETURNING id, username, password_hash
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await?;

        Ok(admin)
    }
}
