use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::ToSchema;

/// `{"success": true}` acknowledgement for updates and deletes.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Acknowledgement carrying the id of the created record.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i32,
}

impl CreatedResponse {
    pub fn new(id: i32) -> Self {
        Self { success: true, id }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Accepts a JSON integer or a numeric string. HTML forms serialized with
/// `Object.fromEntries` send every field as a string. Blank strings and
/// `null` become `None`.
pub fn lenient_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(value)) => i32::try_from(value)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("{value} is out of range"))),
        Some(Raw::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<i32>()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("'{text}' is not an integer")))
        }
    }
}

/// Trims an optional free-text field, mapping blank input to `None`.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
