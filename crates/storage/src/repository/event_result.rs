use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::{EventResult, EventResultWithDepartment, NewEventResult};
use crate::services::standings;

pub struct EventResultRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventResultRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all results with their department name, newest first
    pub async fn list(&self) -> Result<Vec<EventResultWithDepartment>> {
        let results = sqlx::query_as::<_, EventResultWithDepartment>(
            r#"
            SELECT r.id, r.event_name, r.event_type, r.department_id,
                   d.name AS department_name,
                   r.position, r.points_awarded, r.date, r.venue
            FROM results r
            INNER JOIN departments d ON d.id = r.department_id
            ORDER BY r.id DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(results)
    }

    /// Record a result and fold its points into the standings atomically.
    /// Fails with `NotFound` when the department does not exist.
    pub async fn create(&self, new: &NewEventResult) -> Result<EventResult> {
        let mut tx = standings::begin(self.pool).await?;

        let department_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM departments WHERE id = $1)")
                .bind(new.department_id)
                .fetch_one(&mut *tx)
                .await?;

        if !department_exists {
            return Err(StorageError::NotFound);
        }

        let result = sqlx::query_as::<_, EventResult>(
            r#"
            INSERT INTO results (event_name, event_type, department_id, position,
                                 points_awarded, date, venue)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, event_name, event_type, department_id, position,
                      points_awarded, date, venue
            "#,
        )
        .bind(&new.event_name)
        .bind(new.event_type.as_str())
        .bind(new.department_id)
        .bind(new.position)
        .bind(new.points_awarded)
        .bind(&new.date)
        .bind(&new.venue)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            let error = StorageError::from(e);
            if error.is_foreign_key_violation() {
                StorageError::NotFound
            } else {
                error
            }
        })?;

        standings::recalculate(&mut tx).await?;
        tx.commit().await?;

        Ok(result)
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        let mut tx = standings::begin(self.pool).await?;

        let deleted = sqlx::query("DELETE FROM results WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        standings::recalculate(&mut tx).await?;
        tx.commit().await?;

        Ok(())
    }
}
