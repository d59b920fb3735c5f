//! Asset payloads for the home feed, search, and profile endpoints

use serde::Deserialize;

use super::ResponseEnvelope;
use super::auth::UserData;

/// One uploaded video and its metadata.
///
/// The uploader is denormalized into `username`/`photo` by the backend;
/// there is no foreign key for the client to resolve.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetItem {
    pub asset_id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Server-relative media path, e.g. "uploads/assets/clip.mp4"
    pub file_path: String,
    /// Uploader username
    pub username: String,
    pub created_at: Option<String>,
    /// Missing on older backend rows, defaults to 0
    #[serde(default)]
    pub download_count: i64,
    /// File size in bytes when the backend reports it
    pub file_size: Option<i64>,
    /// Uploader photo path, sent as `profile_photo`
    #[serde(rename = "profile_photo")]
    pub photo: Option<String>,
    pub tags: Option<String>,
}

/// Envelope for GET /assets and GET /search
#[derive(Debug, Clone, Deserialize)]
pub struct AssetResponse {
    pub error: bool,
    pub message: String,
    pub assets: Vec<AssetItem>,
}

impl ResponseEnvelope for AssetResponse {
    fn is_error(&self) -> bool {
        self.error
    }

    fn message(&self) -> Option<&str> {
        Some(&self.message)
    }
}

/// Envelope for GET /users/{id}: the profile plus that user's uploads
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    pub error: bool,
    pub message: String,
    pub user: UserData,
    pub assets: Vec<AssetItem>,
}

impl ResponseEnvelope for ProfileResponse {
    fn is_error(&self) -> bool {
        self.error
    }

    fn message(&self) -> Option<&str> {
        Some(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_download_count_defaults_to_zero() {
        let json = r#"{
            "asset_id": 1,
            "title": "clip",
            "file_path": "uploads/assets/clip.mp4",
            "username": "a"
        }"#;

        let asset: AssetItem = serde_json::from_str(json).expect("decode asset");
        assert_eq!(asset.download_count, 0);
        assert_eq!(asset.description, None);
        assert_eq!(asset.file_size, None);
    }

    #[test]
    fn full_asset_row_decodes() {
        let json = r#"{
            "asset_id": 42,
            "title": "clip",
            "description": "a clip",
            "file_path": "uploads/assets/clip.mp4",
            "username": "a",
            "created_at": "2024-11-02 10:00:00",
            "download_count": 3,
            "file_size": 1048576,
            "profile_photo": "uploads/photos/a.jpg",
            "tags": "fun,travel"
        }"#;

        let asset: AssetItem = serde_json::from_str(json).expect("decode asset");
        assert_eq!(asset.asset_id, 42);
        assert_eq!(asset.download_count, 3);
        assert_eq!(asset.file_size, Some(1_048_576));
        assert_eq!(asset.photo.as_deref(), Some("uploads/photos/a.jpg"));
    }

    #[test]
    fn profile_response_carries_user_and_assets() {
        let json = r#"{
            "error": false,
            "message": "ok",
            "user": {"user_id": 7, "username": "a", "email": "a@x.com"},
            "assets": [
                {"asset_id": 1, "title": "clip", "file_path": "uploads/assets/clip.mp4", "username": "a"}
            ]
        }"#;

        let profile: ProfileResponse = serde_json::from_str(json).expect("decode profile");
        assert_eq!(profile.user.id, 7);
        assert_eq!(profile.assets.len(), 1);
    }
}
