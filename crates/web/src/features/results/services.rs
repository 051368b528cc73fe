use sqlx::PgPool;
use storage::{
    error::Result,
    models::{EventResult, EventResultWithDepartment, NewEventResult},
    repository::event_result::EventResultRepository,
};

/// List all results with department names
pub async fn list_results(pool: &PgPool) -> Result<Vec<EventResultWithDepartment>> {
    let repo = EventResultRepository::new(pool);
    repo.list().await
}

/// Record a result; standings are recomputed before returning
pub async fn create_result(pool: &PgPool, new: &NewEventResult) -> Result<EventResult> {
    let repo = EventResultRepository::new(pool);
    repo.create(new).await
}

/// Delete a result; standings are recomputed before returning
pub async fn delete_result(pool: &PgPool, id: i32) -> Result<()> {
    let repo = EventResultRepository::new(pool);
    repo.delete(id).await
}
