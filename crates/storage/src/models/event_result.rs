use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Mens,
    Womens,
    Team,
    Individual,
}

impl EventType {
    pub const ALL: [EventType; 4] = [Self::Mens, Self::Womens, Self::Team, Self::Individual];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mens => "mens",
            Self::Womens => "womens",
            Self::Team => "team",
            Self::Individual => "individual",
        }
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown event type '{s}'"))
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one event for one department.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EventResult {
    pub id: i32,
    pub event_name: String,
    pub event_type: String,
    pub department_id: i32,
    pub position: i32,
    pub points_awarded: i32,
    pub date: Option<String>,
    pub venue: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct EventResultWithDepartment {
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

/// A validated result ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewEventResult {
    pub event_name: String,
    pub event_type: EventType,
    pub department_id: i32,
    pub position: i32,
    pub points_awarded: i32,
    pub date: Option<String>,
    pub venue: Option<String>,
}
