//! Typed client for the ClipVault REST backend
//!
//! One method per backend capability. Every request is routed through the
//! authenticated pipeline and every response through a shared decode path
//! that separates transport failures from server-reported rejections.
//!
//! Operations are plain futures: dropping one aborts the request and
//! spawning one detaches it, so the caller decides what navigation away
//! from a screen means for in-flight work. The client holds no global
//! state; the session store is injected at construction.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use session::store::SessionStore;
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::ResponseEnvelope;
use crate::models::asset::{AssetResponse, ProfileResponse};
use crate::models::auth::{
    AuthResponse, LoginRequest, RegisterRequest, TrackDownloadRequest, UpdateProfileRequest,
};
use crate::models::category::CategoryResponse;
use crate::multipart::{self, MediaFile, VideoUpload};
use crate::pipeline::attach_bearer;
use crate::validation;

/// Asynchronous client for the ClipVault REST backend
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: SessionStore,
}

impl ApiClient {
    /// Build a client from configuration and an injected session store
    pub fn new(config: ClientConfig, session: SessionStore) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ApiError::Connection)?;

        Ok(ApiClient {
            http,
            config,
            session,
        })
    }

    /// The injected session store
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    /// Shared dispatch: attach credentials, send, and decode.
    ///
    /// Transport failures surface as `Connection`. A non-2xx response is
    /// decoded as an error envelope when possible so the server's own
    /// message reaches the user verbatim, with a status-derived fallback
    /// otherwise. A 2xx envelope flagged `error == true` is a rejection
    /// as well.
    async fn execute<T>(&self, request: RequestBuilder) -> ApiResult<T>
    where
        T: DeserializeOwned + ResponseEnvelope,
    {
        let request = attach_bearer(request, &self.session);
        let response = request.send().await.map_err(ApiError::Connection)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(ApiError::Connection)?;

        if !status.is_success() {
            let message = rejection_message(status, &bytes);
            warn!("request rejected with status {}: {}", status, message);
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let payload: T = serde_json::from_slice(&bytes)?;
        if payload.is_error() {
            let message = payload
                .message()
                .unwrap_or("Request rejected by the server")
                .to_string();
            warn!("backend flagged request as failed: {}", message);
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(payload)
    }

    /// POST /login.
    ///
    /// On success the returned token is persisted durably before this
    /// method returns, so the next outgoing request is authenticated;
    /// the user id is persisted fire-and-forget.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        validation::validate_login(email, password).map_err(ApiError::Validation)?;

        info!("logging in as {}", email);
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self
            .execute(self.http.post(self.url("login")).json(&body))
            .await?;

        match &auth.token {
            Some(token) => self.session.save_token(token)?,
            None => warn!("login succeeded without a token, session left untouched"),
        }
        if let Some(user) = &auth.user {
            self.session.save_user_id(user.id);
        }

        Ok(auth)
    }

    /// POST /register
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        validation::validate_registration(request).map_err(ApiError::Validation)?;

        info!("registering new account {}", request.username);
        self.execute(self.http.post(self.url("register")).json(request))
            .await
    }

    /// POST /upload — multipart video plus metadata.
    ///
    /// Rejected locally when a required field is missing or the file
    /// exceeds the configured size cap; no request is sent in that case.
    pub async fn upload_video(&self, upload: VideoUpload) -> ApiResult<AuthResponse> {
        validation::validate_upload(&upload, self.config.max_upload_bytes)
            .map_err(ApiError::Validation)?;

        let user_id = self.session.user_id();
        info!(
            "uploading {} ({} bytes)",
            upload.file.file_name, upload.file.size
        );
        let form = multipart::video_form(upload, user_id).await?;
        self.execute(self.http.post(self.url("upload")).multipart(form))
            .await
    }

    /// GET /assets
    pub async fn list_assets(&self) -> ApiResult<AssetResponse> {
        self.execute(self.http.get(self.url("assets"))).await
    }

    /// GET /users/{id}
    pub async fn get_user_profile(&self, user_id: i64) -> ApiResult<ProfileResponse> {
        self.execute(self.http.get(self.url(&format!("users/{}", user_id))))
            .await
    }

    /// GET /search.
    ///
    /// `category_id` is appended to the query string only when present,
    /// so filtered and unfiltered searches stay distinct on the wire.
    pub async fn search_assets(
        &self,
        query: &str,
        category_id: Option<i64>,
    ) -> ApiResult<AssetResponse> {
        let mut request = self.http.get(self.url("search")).query(&[("q", query)]);
        if let Some(category) = category_id {
            request = request.query(&[("category_id", category)]);
        }
        self.execute(request).await
    }

    /// GET /categories
    pub async fn get_categories(&self) -> ApiResult<CategoryResponse> {
        self.execute(self.http.get(self.url("categories"))).await
    }

    /// PUT /users/{id}
    pub async fn update_profile(
        &self,
        user_id: i64,
        request: &UpdateProfileRequest,
    ) -> ApiResult<AuthResponse> {
        validation::validate_profile_update(request).map_err(ApiError::Validation)?;

        self.execute(
            self.http
                .put(self.url(&format!("users/{}", user_id)))
                .json(request),
        )
        .await
    }

    /// DELETE /assets/{id}
    pub async fn delete_asset(&self, asset_id: i64) -> ApiResult<AuthResponse> {
        info!("deleting asset {}", asset_id);
        self.execute(self.http.delete(self.url(&format!("assets/{}", asset_id))))
            .await
    }

    /// POST /users/{id}/photo — multipart photo
    pub async fn upload_profile_photo(
        &self,
        user_id: i64,
        photo: MediaFile,
    ) -> ApiResult<AuthResponse> {
        info!("uploading profile photo {}", photo.file_name);
        let form = multipart::photo_form(photo).await?;
        self.execute(
            self.http
                .post(self.url(&format!("users/{}/photo", user_id)))
                .multipart(form),
        )
        .await
    }

    /// DELETE /users/{id}/photo
    pub async fn delete_profile_photo(&self, user_id: i64) -> ApiResult<AuthResponse> {
        self.execute(
            self.http
                .delete(self.url(&format!("users/{}/photo", user_id))),
        )
        .await
    }

    /// POST /assets/{id}/download — report a download using the session's
    /// user id.
    ///
    /// Callers wrapping a platform download manager may spawn this future
    /// and move on; the report is independent of the download itself.
    pub async fn track_download(&self, asset_id: i64) -> ApiResult<AuthResponse> {
        let body = TrackDownloadRequest {
            user_id: self.session.user_id(),
        };
        self.execute(
            self.http
                .post(self.url(&format!("assets/{}/download", asset_id)))
                .json(&body),
        )
        .await
    }

    /// Forget the stored credentials
    pub fn logout(&self) -> ApiResult<()> {
        info!("logging out, clearing stored session");
        self.session.clear()?;
        Ok(())
    }

    /// Resolve a server-relative media path against the configured base
    /// URL.
    ///
    /// Absolute URLs pass through untouched; backslashes from legacy
    /// backend rows are normalized to forward slashes.
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            return path.to_string();
        }
        self.url(&path.replace('\\', "/"))
    }
}

/// Extract the server's own failure message from an error body, falling
/// back to a status-derived message when the body is not decodable
fn rejection_message(status: StatusCode, body: &[u8]) -> String {
    match serde_json::from_slice::<AuthResponse>(body) {
        Ok(envelope) if !envelope.message.is_empty() => envelope.message,
        _ => format!("Request failed with status {}", status.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use session::backend::MemoryBackend;

    fn client_with_base(base_url: &str) -> ApiClient {
        let config = ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        };
        ApiClient::new(config, SessionStore::new(MemoryBackend::new())).expect("build client")
    }

    #[test]
    fn asset_url_resolves_relative_paths() {
        let client = client_with_base("http://host:3000/");
        assert_eq!(
            client.asset_url("uploads/assets/clip.mp4"),
            "http://host:3000/uploads/assets/clip.mp4"
        );
    }

    #[test]
    fn asset_url_normalizes_backslashes() {
        let client = client_with_base("http://host:3000/");
        assert_eq!(
            client.asset_url("uploads\\photos\\a.jpg"),
            "http://host:3000/uploads/photos/a.jpg"
        );
    }

    #[test]
    fn asset_url_passes_absolute_urls_through() {
        let client = client_with_base("http://host:3000/");
        assert_eq!(
            client.asset_url("http://cdn.example.com/clip.mp4"),
            "http://cdn.example.com/clip.mp4"
        );
    }

    #[test]
    fn rejection_message_prefers_server_message() {
        let body = br#"{"error": true, "message": "Username/Email sudah terdaftar!"}"#;
        assert_eq!(
            rejection_message(StatusCode::CONFLICT, body),
            "Username/Email sudah terdaftar!"
        );
    }

    #[test]
    fn rejection_message_falls_back_on_undecodable_body() {
        assert_eq!(
            rejection_message(StatusCode::INTERNAL_SERVER_ERROR, b"<html>boom</html>"),
            "Request failed with status 500"
        );
    }
}
