use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::common::{lenient_i32, non_blank};
use crate::models::{EventResultWithDepartment, EventType, NewEventResult};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResultResponse {
    pub id: i32,
    pub event_name: String,
    pub event_type: String,
    pub department_id: i32,
    pub department_name: String,
    pub position: i32,
    pub points_awarded: i32,
    pub date: Option<String>,
    pub venue: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateResultRequest {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 100,
        message = "Event name must be between 1 and 100 characters"
    ))]
    pub event_name: String,

    #[serde(default)]
    #[validate(custom(function = "validate_event_type"))]
    pub event_type: String,

    #[serde(default, deserialize_with = "lenient_i32")]
    #[validate(required(message = "Department is required"))]
    pub department_id: Option<i32>,

    #[serde(default, deserialize_with = "lenient_i32")]
    #[validate(
        required(message = "Position is required"),
        range(min = 1, max = 3, message = "Position must be 1, 2 or 3")
    )]
    pub position: Option<i32>,

    #[serde(default, deserialize_with = "lenient_i32")]
    #[validate(
        required(message = "Points awarded is required"),
        range(
            min = -1_000_000,
            max = 1_000_000,
            message = "Points awarded must be between -1000000 and 1000000"
        )
    )]
    pub points_awarded: Option<i32>,

    #[validate(length(max = 20))]
    pub date: Option<String>,

    #[validate(length(max = 100))]
    pub venue: Option<String>,
}

fn validate_event_type(event_type: &str) -> Result<(), validator::ValidationError> {
    event_type.parse::<EventType>().map(|_| ()).map_err(|_| {
        let mut error = validator::ValidationError::new("invalid_event_type");
        error.message = Some("Event type must be one of: mens, womens, team, individual".into());
        error
    })
}

impl CreateResultRequest {
    /// Converts a request that already passed `validate()` into an insertable
    /// result. Returns `None` when a required field is still missing.
    pub fn to_new_result(&self) -> Option<NewEventResult> {
        Some(NewEventResult {
            event_name: self.event_name.trim().to_string(),
            event_type: self.event_type.parse().ok()?,
            department_id: self.department_id?,
            position: self.position?,
            points_awarded: self.points_awarded?,
            date: non_blank(self.date.as_deref()),
            venue: non_blank(self.venue.as_deref()),
        })
    }
}

impl From<EventResultWithDepartment> for ResultResponse {
    fn from(row: EventResultWithDepartment) -> Self {
        Self {
            id: row.id,
            event_name: row.event_name,
            event_type: row.event_type,
            department_id: row.department_id,
            department_name: row.department_name,
            position: row.position,
            points_awarded: row.points_awarded,
            date: row.date,
            venue: row.venue,
        }
    }
}
