//! Typed client for the ClipVault backend
//!
//! This crate is the client core of the ClipVault application: a typed
//! asynchronous client for the REST backend (login, register, asset
//! listing and search, profile management, multipart uploads, download
//! tracking), the authenticated request pipeline that attaches the stored
//! bearer token, local pre-network validation, and the wire data model
//! including its backward-compatible field names.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod multipart;
pub mod pipeline;
pub mod validation;
