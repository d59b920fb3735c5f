//! Custom error types for the ClipVault API client

use thiserror::Error;

/// Custom error type for API client operations.
///
/// Transport failures (`Connection`) are kept distinct from
/// server-reported failures (`Rejected`): the former means no response
/// reached the client at all, the latter carries a message fit for
/// direct display to the user.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure, no response was received
    #[error("connection error: {0}")]
    Connection(#[source] reqwest::Error),

    /// The server reported a failure for this request
    #[error("{message}")]
    Rejected {
        /// HTTP status of the response (200 when the envelope itself
        /// carried the error flag)
        status: u16,
        /// User-facing failure message
        message: String,
    },

    /// Successful status but the body did not match the expected model
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local validation failure, raised before any network call
    #[error("{0}")]
    Validation(String),

    /// Session persistence failure while recording credentials
    #[error("session error: {0}")]
    Session(#[from] session::error::SessionError),

    /// A local media file could not be read
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with ApiError
pub type ApiResult<T> = Result<T, ApiError>;
