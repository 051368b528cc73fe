use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::Department;
use crate::services::standings;

pub struct DepartmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DepartmentRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List departments in standings order
    pub async fn list(&self) -> Result<Vec<Department>> {
        let departments = sqlx::query_as::<_, Department>(
            r#"
            SELECT id, name, total_points, rank
            FROM departments
            ORDER BY rank, name, id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(departments)
    }

    /// Insert a department and recompute standings in the same transaction.
    pub async fn create(&self, name: &str) -> Result<Department> {
        let mut tx = standings::begin(self.pool).await?;

        let id: i32 = sqlx::query_scalar("INSERT INTO departments (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| duplicate_name(e, name))?;

        let departments = standings::recalculate(&mut tx).await?;
        tx.commit().await?;

        departments
            .into_iter()
            .find(|d| d.id == id)
            .ok_or(StorageError::NotFound)
    }

    /// Rename a department. Ties in the standings are broken by name, so the
    /// ranks are recomputed along with the rename.
    pub async fn rename(&self, id: i32, name: &str) -> Result<Department> {
        let mut tx = standings::begin(self.pool).await?;

        let updated = sqlx::query("UPDATE departments SET name = $2 WHERE id = $1")
            .bind(id)
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(|e| duplicate_name(e, name))?;

        if updated.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        let departments = standings::recalculate(&mut tx).await?;
        tx.commit().await?;

        departments
            .into_iter()
            .find(|d| d.id == id)
            .ok_or(StorageError::NotFound)
    }

    /// Delete a department together with its results, then recompute.
    pub async fn delete(&self, id: i32) -> Result<()> {
        let mut tx = standings::begin(self.pool).await?;

        let deleted = sqlx::query("DELETE FROM departments WHERE id = $1")
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

fn duplicate_name(error: sqlx::Error, name: &str) -> StorageError {
    StorageError::from(error)
        .on_unique_violation(|| format!("Department '{name}' already exists"))
}
