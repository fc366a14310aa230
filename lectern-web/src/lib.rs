//! Lectern Web - entitlement-gated media delivery over HTTP
//!
//! Axum server exposing video streaming and resource download endpoints.
//! Requests walk a fixed pipeline: authenticate, locate the asset,
//! authorize against course entitlements, negotiate the byte range, then
//! stream the blob. All domain logic lives in `lectern-core`; this crate
//! only maps it onto HTTP.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

// Re-export main types
pub use auth::{AuthProvider, StaticTokenAuth};
pub use error::MediaError;
pub use server::{AppState, ServeStats, router, run_server};
