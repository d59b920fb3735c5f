//! Durable session storage for the ClipVault client
//!
//! This crate holds "who is logged in": the authentication token and the
//! numeric user id, persisted through a pluggable key-value backend so the
//! session survives process restarts. The store is an explicit, cheaply
//! clonable handle that gets injected wherever credentials are needed,
//! rather than a process-wide singleton.

pub mod backend;
pub mod error;
pub mod store;
