//! Media storage collaborator
//!
//! Product images are not stored by this server: each upload is forwarded to
//! the external media service, which answers with a remote URL and a storage
//! identifier. Only those references are persisted.

use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::core::Config;
use crate::db::models::ProductImage;
use shared::{AppError, AppResult};

/// Maximum file size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Maximum number of image files per product request
pub const MAX_IMAGES_PER_REQUEST: usize = 5;

/// Supported image formats
pub const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// A file pulled out of a multipart request
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Remote media storage collaborator
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Upload one file; returns the remote URL and storage identifier
    async fn upload(&self, file: &UploadFile, folder: &str) -> AppResult<ProductImage>;

    /// Remove a stored object by its identifier
    ///
    /// TODO: call this from product deletion once the collaborator exposes a
    /// bulk delete; until then remote objects of deleted products leak.
    async fn delete(&self, public_id: &str) -> AppResult<()>;
}

/// Validate an upload before it is sent to the collaborator
pub fn validate_image(file: &UploadFile) -> AppResult<()> {
    if file.bytes.is_empty() {
        return Err(AppError::validation("Empty file provided"));
    }
    if file.bytes.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {} bytes ({}MB)",
            MAX_FILE_SIZE,
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    let ext = file
        .filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .ok_or_else(|| {
            AppError::validation(format!("Invalid file extension for: {}", file.filename))
        })?;
    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    // Verify it's actually an image by trying to decode it
    if let Err(e) = image::load_from_memory(&file.bytes) {
        return Err(AppError::validation(format!(
            "Invalid image file ({ext}): {e}"
        )));
    }

    Ok(())
}

/// HTTP-backed implementation talking to the configured media service
#[derive(Clone)]
pub struct CloudMediaStorage {
    client: reqwest::Client,
    upload_url: String,
}

/// Collaborator's upload answer
#[derive(Debug, Deserialize)]
struct UploadResult {
    secure_url: String,
    public_id: String,
}

impl CloudMediaStorage {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url: config.media_upload_url.clone(),
        }
    }
}

#[async_trait]
impl MediaStorage for CloudMediaStorage {
    async fn upload(&self, file: &UploadFile, folder: &str) -> AppResult<ProductImage> {
        // Content hash travels with the upload so the collaborator can verify
        let checksum = hex::encode(Sha256::digest(&file.bytes));

        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.filename.clone());
        let form = reqwest::multipart::Form::new()
            .text("folder", folder.to_string())
            .text("checksum", checksum)
            .part("file", part);

        let resp = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Media upload failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::upstream(format!(
                "Media upload returned {}",
                resp.status()
            )));
        }

        let result: UploadResult = resp
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Malformed media upload response: {e}")))?;

        Ok(ProductImage {
            url: result.secure_url,
            public_id: result.public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> AppResult<()> {
        let resp = self
            .client
            .delete(format!("{}/{}", self.upload_url, public_id))
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Media delete failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::upstream(format!(
                "Media delete returned {}",
                resp.status()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_file(name: &str) -> UploadFile {
        let img = image::RgbImage::from_pixel(2, 2, image::Rgb([10, 120, 200]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        UploadFile {
            filename: name.to_string(),
            bytes: out.into_inner(),
        }
    }

    #[test]
    fn valid_png_passes() {
        assert!(validate_image(&png_file("lamp.png")).is_ok());
    }

    #[test]
    fn wrong_extension_and_garbage_bytes_are_rejected() {
        let mut file = png_file("lamp.gif");
        assert!(validate_image(&file).is_err());

        file.filename = "lamp.png".to_string();
        file.bytes = b"definitely not an image".to_vec();
        assert!(validate_image(&file).is_err());

        file.bytes.clear();
        assert!(validate_image(&file).is_err());
    }

    #[test]
    fn oversized_file_is_rejected() {
        let file = UploadFile {
            filename: "big.png".to_string(),
            bytes: vec![0u8; MAX_FILE_SIZE + 1],
        };
        assert!(validate_image(&file).is_err());
    }
}
