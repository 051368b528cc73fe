use sqlx::PgPool;
use storage::{
    dto::department::DepartmentRequest, error::Result, models::Department,
    repository::department::DepartmentRepository,
};

/// List departments in standings order
pub async fn list_departments(pool: &PgPool) -> Result<Vec<Department>> {
    let repo = DepartmentRepository::new(pool);
    repo.list().await
}

/// Create a department; standings are recomputed before returning
pub async fn create_department(pool: &PgPool, request: &DepartmentRequest) -> Result<Department> {
    let repo = DepartmentRepository::new(pool);
    repo.create(request.trimmed_name()).await
}

pub async fn rename_department(
    pool: &PgPool,
    id: i32,
    request: &DepartmentRequest,
) -> Result<Department> {
    let repo = DepartmentRepository::new(pool);
    repo.rename(id, request.trimmed_name()).await
}

/// Delete a department and its results
pub async fn delete_department(pool: &PgPool, id: i32) -> Result<()> {
    let repo = DepartmentRepository::new(pool);
    repo.delete(id).await
}
