//! Media files and multipart upload encoding
//!
//! Uploads send one binary file part alongside plain-text metadata parts.
//! The file part carries the original filename and a best-guess content
//! type; numeric metadata travels as decimal strings, which is what the
//! backend's form parser expects.

use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::error::{ApiError, ApiResult};

/// A locally selected media file, reduced to what an upload needs: a
/// readable byte source, the original filename, and the size in bytes.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
}

impl MediaFile {
    /// Stat `path` and capture its filename and byte size
    pub async fn from_path(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.bin".to_string());

        Ok(MediaFile {
            path,
            file_name,
            size: metadata.len(),
        })
    }

    /// Read the file and wrap it as a named multipart part
    async fn into_part(self, fallback_mime: &str) -> ApiResult<Part> {
        let mime = guess_mime(&self.file_name, fallback_mime);
        debug!("encoding {} as {} ({} bytes)", self.file_name, mime, self.size);

        let bytes = tokio::fs::read(&self.path).await?;
        Part::bytes(bytes)
            .file_name(self.file_name)
            .mime_str(mime)
            .map_err(|_| ApiError::Validation(format!("unsupported content type: {}", mime)))
    }
}

/// Metadata accompanying a video upload
#[derive(Debug, Clone)]
pub struct VideoUpload {
    pub file: MediaFile,
    pub title: String,
    pub description: String,
    pub category_id: i64,
    pub tags: String,
}

/// Build the multipart body for POST /upload
pub(crate) async fn video_form(upload: VideoUpload, user_id: i64) -> ApiResult<Form> {
    let VideoUpload {
        file,
        title,
        description,
        category_id,
        tags,
    } = upload;

    let video = file.into_part("video/*").await?;
    Ok(Form::new()
        .part("video", video)
        .text("user_id", user_id.to_string())
        .text("title", title)
        .text("description", description)
        .text("category_id", category_id.to_string())
        .text("tags", tags))
}

/// Build the multipart body for POST /users/{id}/photo
pub(crate) async fn photo_form(photo: MediaFile) -> ApiResult<Form> {
    let part = photo.into_part("image/*").await?;
    Ok(Form::new().part("photo", part))
}

/// Best-guess content type from the filename extension, falling back to
/// the wildcard type the backend accepts for the part kind
fn guess_mime<'a>(file_name: &str, fallback: &'a str) -> &'a str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("mp4" | "m4v") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("mkv") => "video/x-matroska",
        Some("avi") => "video/x-msvideo",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => fallback,
    }
}
