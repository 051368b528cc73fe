use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A competing department. `total_points` and `rank` are a cache of the
/// last standings recompute, never written directly by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Department {
    pub id: i32,
    pub name: String,
    pub total_points: i32,
    pub rank: i32,
}

/// Summed points for one department, before ranks are assigned.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DepartmentTotal {
    pub id: i32,
    pub name: String,
    pub total_points: i32,
}
