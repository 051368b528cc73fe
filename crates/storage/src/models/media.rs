use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Winner,
    #[default]
    Event,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Winner => "winner",
            Self::Event => "event",
        }
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "winner" => Ok(Self::Winner),
            "event" => Ok(Self::Event),
            other => Err(format!("unknown media type '{other}'")),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Media {
    pub id: i32,
    pub event_name: Option<String>,
    pub media_type: String,
    pub image_path: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMedia {
    pub event_name: Option<String>,
    pub media_type: MediaType,
    pub image_path: String,
    pub caption: Option<String>,
}
