//! Request and response models for the ClipVault backend
//!
//! All shapes mirror the backend's JSON contract, including the legacy
//! field names kept for backward compatibility (`profile_photo`,
//! `category_id`/`category_name`, and the dual-keyed user id).

pub mod asset;
pub mod auth;
pub mod category;

/// Common envelope shape shared by every backend response.
///
/// The backend reports failures in-band through an `error` flag and a
/// user-facing `message`; this trait lets the client surface them
/// uniformly regardless of the payload type.
pub trait ResponseEnvelope {
    /// Whether the backend flagged this response as a failure
    fn is_error(&self) -> bool;

    /// User-facing message, when the endpoint carries one
    fn message(&self) -> Option<&str>;
}
