use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Department;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentResponse {
    pub id: i32,
    pub name: String,
    pub total_points: i32,
    pub rank: i32,
}

/// Payload for both creating and renaming a department.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct DepartmentRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    pub name: String,
}

impl DepartmentRequest {
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }
}

fn validate_name(name: &str) -> Result<(), validator::ValidationError> {
    let len = name.trim().chars().count();
    if (1..=100).contains(&len) {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("invalid_name");
        error.message = Some("Name must be between 1 and 100 characters".into());
        Err(error)
    }
}

impl From<Department> for DepartmentResponse {
    fn from(department: Department) -> Self {
        Self {
            id: department.id,
            name: department.name,
            total_points: department.total_points,
            rank: department.rank,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_is_rejected() {
        let req = DepartmentRequest {
            name: "   ".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_name_is_trimmed() {
        let req: DepartmentRequest = serde_json::from_str(r#"{"name": "  Physics "}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.trimmed_name(), "Physics");
    }

    #[test]
    fn test_missing_name_fails_validation() {
        let req: DepartmentRequest = serde_json::from_str("{}").unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }
}
