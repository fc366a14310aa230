//! Centralized configuration for Lectern.
//!
//! All tunable parameters are defined here to avoid hard-coded values
//! scattered throughout the codebase.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Central configuration for all Lectern components.
#[derive(Debug, Clone, Default)]
pub struct LecternConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address and port the media server binds to
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

/// Blob storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Root directory holding media blobs, addressed by storage key
    pub content_root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("content"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listen_address_is_local() {
        let config = LecternConfig::default();
        assert!(config.server.listen.ip().is_loopback());
        assert_eq!(config.server.listen.port(), 3000);
    }
}
