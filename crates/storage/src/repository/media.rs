use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::{Media, NewMedia};

pub struct MediaRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MediaRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Media>> {
        let media = sqlx::query_as::<_, Media>(
            "SELECT id, event_name, media_type, image_path, caption FROM media ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(media)
    }

    pub async fn create(&self, new: &NewMedia) -> Result<Media> {
        let media = sqlx::query_as::<_, Media>(
            r#"
            INSERT INTO media (event_name, media_type, image_path, caption)
            VALUES ($1, $2, $3, $4)
            RETURNING id, event_name, media_type, image_path, caption
            "#,
        )
        .bind(&new.event_name)
        .bind(new.media_type.as_str())
        .bind(&new.image_path)
        .bind(&new.caption)
        .fetch_one(self.pool)
        .await?;

        Ok(media)
    }

    /// Delete a media record, returning it so the caller can clean up the
    /// stored file.
    pub async fn delete(&self, id: i32) -> Result<Media> {
        sqlx::query_as::<_, Media>(
            r#"
            DELETE FROM media
            WHERE id = $1
            RETURNING id, event_name, media_type, image_path, caption
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }
}
