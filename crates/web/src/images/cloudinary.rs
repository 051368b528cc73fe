use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use super::{ImageStore, ImageStoreError};
use crate::config::{CloudinaryConfig, SignatureAlgorithm};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Uploads images to Cloudinary with signed requests.
pub struct CloudinaryImageStore {
    config: CloudinaryConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ApiErrorMessage {
    message: String,
}

impl CloudinaryImageStore {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{API_BASE}/{}/image/{action}", self.config.cloud_name)
    }

    /// Common signed fields for an API call on `public_id`.
    fn signed_form(&self, public_id: &str) -> Form {
        let timestamp = Utc::now().timestamp().to_string();
        let algorithm = self.config.signature_algorithm;
        let signature = sign(
            &[("public_id", public_id), ("timestamp", timestamp.as_str())],
            &self.config.api_secret,
            algorithm,
        );

        let form = Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("public_id", public_id.to_string())
            .text("timestamp", timestamp)
            .text("signature", signature);

        match algorithm {
            SignatureAlgorithm::Sha1 => form,
            SignatureAlgorithm::Sha256 => form.text("signature_algorithm", "sha256"),
        }
    }

    async fn send<T>(&self, action: &str, form: Form) -> Result<T, ImageStoreError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .post(self.endpoint(action))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(ImageStoreError::Provider(message));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ImageStore for CloudinaryImageStore {
    async fn store(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ImageStoreError> {
        let public_id = public_id_for(file_name);
        let form = self
            .signed_form(&public_id)
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()));

        let uploaded: UploadResponse = self.send("upload", form).await?;
        tracing::debug!(%public_id, url = %uploaded.secure_url, "Uploaded image to Cloudinary");

        Ok(uploaded.secure_url)
    }

    async fn delete(&self, image_path: &str) -> Result<(), ImageStoreError> {
        let public_id = public_id_from_url(image_path)
            .ok_or_else(|| ImageStoreError::InvalidPath(image_path.to_string()))?;

        let destroyed: DestroyResponse = self.send("destroy", self.signed_form(&public_id)).await?;
        if destroyed.result != "ok" {
            return Err(ImageStoreError::Provider(format!(
                "destroy of '{public_id}' returned '{}'",
                destroyed.result
            )));
        }

        Ok(())
    }
}

/// Cloudinary request signature: the parameters sorted by name, joined as
/// `k=v&k=v`, with the API secret appended, hashed with `algorithm`.
fn sign(params: &[(&str, &str)], api_secret: &str, algorithm: SignatureAlgorithm) -> String {
    let mut params = params.to_vec();
    params.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let payload = format!("{to_sign}{api_secret}");
    let digest = match algorithm {
        SignatureAlgorithm::Sha1 => Sha1::digest(payload.as_bytes()).to_vec(),
        SignatureAlgorithm::Sha256 => Sha256::digest(payload.as_bytes()).to_vec(),
    };

    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Public id for an upload: the stored file name without its extension.
fn public_id_for(file_name: &str) -> String {
    file_name.split('.').next().unwrap_or(file_name).to_string()
}

/// Recover the public id from a delivery URL such as
/// `https://res.cloudinary.com/demo/image/upload/v17/20251018_101500_final.png`.
fn public_id_from_url(url: &str) -> Option<String> {
    let url = url.split(['?', '#']).next()?;
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return None;
    }

    let last = url.rsplit('/').next()?;
    let public_id = public_id_for(last);
    (!public_id.is_empty()).then_some(public_id)
}
