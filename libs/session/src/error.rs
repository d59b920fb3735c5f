//! Custom error types for session persistence

use thiserror::Error;

/// Custom error type for session storage operations
#[derive(Error, Debug)]
pub enum SessionError {
    /// The backing file could not be read or written
    #[error("session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored snapshot could not be encoded or decoded
    #[error("session storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Type alias for Result with SessionError
pub type SessionResult<T> = Result<T, SessionError>;
