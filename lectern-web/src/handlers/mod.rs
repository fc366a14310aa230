//! HTTP request handlers organized by functionality

pub mod health;
pub mod media;

// Re-export handler functions
pub use health::health;
pub use media::{download_resource, stream_video};
