//! Client configuration

/// Default upload size cap in bytes (100 MiB), enforced locally before
/// any bytes leave the device
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

const DEFAULT_BASE_URL: &str = "http://localhost:3000/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the ClipVault API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the ClipVault backend; all endpoint paths are relative
    /// to it
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig from environment variables
    ///
    /// # Environment Variables
    /// - `CLIPVAULT_BASE_URL`: backend base URL (default: "http://localhost:3000/")
    /// - `CLIPVAULT_TIMEOUT_SECS`: per-request timeout in seconds (default: 30)
    /// - `CLIPVAULT_MAX_UPLOAD_BYTES`: upload size cap in bytes (default: 104857600)
    pub fn from_env() -> Self {
        let base_url = std::env::var("CLIPVAULT_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let request_timeout_secs = std::env::var("CLIPVAULT_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let max_upload_bytes = std::env::var("CLIPVAULT_MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        ClientConfig {
            base_url,
            request_timeout_secs,
            max_upload_bytes,
        }
    }

    /// Resolve an endpoint path against the configured base URL
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
