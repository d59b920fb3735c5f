//! Input validation for requests that must fail locally, before any
//! network traffic

use std::sync::OnceLock;

use regex::Regex;

use crate::models::auth::{RegisterRequest, UpdateProfileRequest};
use crate::multipart::VideoUpload;

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    if username.len() < 3 {
        return Err("Username must be at least 3 characters long".to_string());
    }

    if username.len() > 32 {
        return Err("Username must be at most 32 characters long".to_string());
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err("Username can only contain letters, numbers, and underscores".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password length; the backend enforces nothing stronger
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate login credentials are present
pub fn validate_login(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Email and password are required".to_string());
    }

    Ok(())
}

/// Validate every field of a registration request
pub fn validate_registration(request: &RegisterRequest) -> Result<(), String> {
    if request.full_name.trim().is_empty() {
        return Err("Full name is required".to_string());
    }

    validate_username(&request.username)?;
    validate_email(&request.email)?;
    validate_password(&request.password)?;

    Ok(())
}

/// Validate upload metadata and the selected file against the size cap
pub fn validate_upload(upload: &VideoUpload, max_upload_bytes: u64) -> Result<(), String> {
    if upload.title.trim().is_empty() {
        return Err("Title is required".to_string());
    }

    if upload.category_id <= 0 {
        return Err("Category is required".to_string());
    }

    if upload.file.size == 0 {
        return Err("Selected file is empty".to_string());
    }

    if upload.file.size > max_upload_bytes {
        return Err(format!(
            "File is too large! Maximum size is {} MB.",
            max_upload_bytes / (1024 * 1024)
        ));
    }

    Ok(())
}

/// Validate profile update fields
pub fn validate_profile_update(request: &UpdateProfileRequest) -> Result<(), String> {
    if request.full_name.trim().is_empty() {
        return Err("Full name is required".to_string());
    }

    validate_username(&request.username)
}
