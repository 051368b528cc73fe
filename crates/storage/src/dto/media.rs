use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Media;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaResponse {
    pub id: i32,
    /// "N/A" when the image is not tied to an event.
    pub event_name: String,
    pub media_type: String,
    pub image_path: String,
    pub caption: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MediaCreatedResponse {
    pub success: bool,
    pub id: i32,
    pub path: String,
}

/// Multipart form accepted by `POST /api/media`.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct MediaUploadForm {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    pub event_name: Option<String>,
    /// `winner` or `event` (default).
    pub media_type: Option<String>,
    pub caption: Option<String>,
}

impl From<Media> for MediaResponse {
    fn from(media: Media) -> Self {
        Self {
            id: media.id,
            event_name: media.event_name.unwrap_or_else(|| "N/A".to_string()),
            media_type: media.media_type,
            image_path: media.image_path,
            caption: media.caption,
        }
    }
}
