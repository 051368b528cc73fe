use axum::extract::Multipart;
use chrono::Utc;
use sqlx::PgPool;
use storage::{
    dto::common::non_blank,
    models::{Media, MediaType, NewMedia},
    repository::media::MediaRepository,
};

use crate::error::{WebError, WebResult};
use crate::images::{ImageStore, stored_file_name};
use crate::state::AppState;

const MAX_EVENT_NAME_LEN: usize = 100;
const MAX_CAPTION_LEN: usize = 200;

/// Fields of the media upload form.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub image: Option<UploadedImage>,
    pub event_name: Option<String>,
    pub media_type: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub async fn list_media(pool: &PgPool) -> storage::error::Result<Vec<Media>> {
    let repo = MediaRepository::new(pool);
    repo.list().await
}

/// Drain a multipart request into an [`UploadForm`]. Unknown parts are
/// skipped.
pub async fn read_upload_form(multipart: &mut Multipart) -> WebResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("image") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                form.image = Some(UploadedImage {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            Some("event_name") => form.event_name = Some(field.text().await?),
            Some("media_type") => form.media_type = Some(field.text().await?),
            Some("caption") => form.caption = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(form)
}

/// Check the form, store the image, then record it. If the record cannot be
/// written the stored image is removed again.
pub async fn create_media(state: &AppState, form: UploadForm) -> WebResult<Media> {
    let image = form
        .image
        .ok_or_else(|| WebError::BadRequest("No image file".to_string()))?;
    if image.file_name.trim().is_empty() {
        return Err(WebError::BadRequest("No selected file".to_string()));
    }

    let media_type = match non_blank(form.media_type.as_deref()) {
        Some(value) => value.parse::<MediaType>().map_err(WebError::BadRequest)?,
        None => MediaType::default(),
    };

    let event_name = non_blank(form.event_name.as_deref());
    if event_name
        .as_ref()
        .is_some_and(|name| name.chars().count() > MAX_EVENT_NAME_LEN)
    {
        return Err(WebError::BadRequest(format!(
            "Event name must be at most {MAX_EVENT_NAME_LEN} characters"
        )));
    }

    let caption = non_blank(form.caption.as_deref());
    if caption
        .as_ref()
        .is_some_and(|caption| caption.chars().count() > MAX_CAPTION_LEN)
    {
        return Err(WebError::BadRequest(format!(
            "Caption must be at most {MAX_CAPTION_LEN} characters"
        )));
    }

    let file_name = stored_file_name(&image.file_name, Utc::now())
        .ok_or_else(|| WebError::BadRequest("Invalid file name".to_string()))?;

    let image_path = state.images.store(&file_name, image.bytes).await?;

    let new = NewMedia {
        event_name,
        media_type,
        image_path,
        caption,
    };

    match MediaRepository::new(state.db.pool()).create(&new).await {
        Ok(media) => Ok(media),
        Err(e) => {
            discard_image(state.images.as_ref(), &new.image_path).await;
            Err(e.into())
        }
    }
}

/// Delete the record, then make a best-effort attempt at the stored file.
pub async fn delete_media(state: &AppState, id: i32) -> WebResult<Media> {
    let media = MediaRepository::new(state.db.pool()).delete(id).await?;
    discard_image(state.images.as_ref(), &media.image_path).await;
    Ok(media)
}

async fn discard_image(images: &dyn ImageStore, image_path: &str) {
    if let Err(e) = images.delete(image_path).await {
        tracing::warn!(%image_path, "Could not delete stored image: {}", e);
    }
}
