//! Authentication and profile payloads

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::ResponseEnvelope;

/// Credentials sent to POST /login
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration payload for POST /register
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Profile fields sent to PUT /users/{id}
#[derive(Debug, Clone, Serialize)]
pub struct UpdateProfileRequest {
    pub full_name: String,
    pub username: String,
    pub bio: String,
    pub location: String,
}

/// Body of POST /assets/{id}/download
#[derive(Debug, Clone, Serialize)]
pub struct TrackDownloadRequest {
    pub user_id: i64,
}

/// Envelope returned by login, register, upload, update, and delete calls.
///
/// `error == false` means the operation succeeded and `message` is a
/// confirmation; `error == true` means `message` carries the user-facing
/// failure reason.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub error: bool,
    pub message: String,
    pub token: Option<String>,
    pub user: Option<UserData>,
}

impl ResponseEnvelope for AuthResponse {
    fn is_error(&self) -> bool {
        self.error
    }

    fn message(&self) -> Option<&str> {
        Some(&self.message)
    }
}

/// A ClipVault user profile.
///
/// The id is dual-keyed on the wire: profile endpoints send `user_id`,
/// the login endpoint sends `id`. Decoding tries `user_id` first and
/// falls back to `id`; both keys absent is a decode error. This adapter
/// is part of the schema, not an annotation side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    /// Server-relative photo path, sent as `profile_photo`
    pub photo: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

/// Wire shape for [`UserData`] carrying both historical id keys
#[derive(Deserialize)]
struct UserWire {
    user_id: Option<i64>,
    id: Option<i64>,
    username: String,
    email: String,
    full_name: Option<String>,
    #[serde(rename = "profile_photo")]
    photo: Option<String>,
    bio: Option<String>,
    location: Option<String>,
}

impl<'de> Deserialize<'de> for UserData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = UserWire::deserialize(deserializer)?;
        let id = wire
            .user_id
            .or(wire.id)
            .ok_or_else(|| D::Error::missing_field("user_id"))?;

        Ok(UserData {
            id,
            username: wire.username,
            email: wire.email,
            full_name: wire.full_name,
            photo: wire.photo,
            bio: wire.bio,
            location: wire.location,
        })
    }
}
