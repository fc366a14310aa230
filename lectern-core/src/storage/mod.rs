//! Blob storage for media bytes.
//!
//! Defines the collaborator interface to the opaque byte store that holds
//! actual file content, keyed by storage key. A file-system implementation
//! backs production; an in-memory implementation backs tests and the demo
//! mode.

pub mod fs_store;
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;

pub use fs_store::FsBlobStore;
pub use memory::MemoryBlobStore;

/// Open handle onto a single stored blob.
///
/// A handle is owned by exactly one request. Reads are sequential after a
/// single positioning seek; dropping the handle releases the underlying
/// resource, which is how early client disconnects are cleaned up.
#[async_trait]
pub trait Blob: Send + std::fmt::Debug {
    /// Total size of the blob in bytes.
    fn size(&self) -> u64;

    /// Positions the next read at `offset` from the start of the blob.
    ///
    /// # Errors
    ///
    /// - `std::io::Error` - The underlying store rejected the seek
    async fn seek_to(&mut self, offset: u64) -> std::io::Result<()>;

    /// Reads the next chunk of at most `max_len` bytes.
    ///
    /// Returns an empty buffer at end of blob.
    ///
    /// # Errors
    ///
    /// - `std::io::Error` - The underlying read failed
    async fn read_chunk(&mut self, max_len: usize) -> std::io::Result<Bytes>;
}

/// Opens blobs by storage key.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Opens the blob stored under `storage_key`.
    ///
    /// # Errors
    ///
    /// - `BlobError::NotFound` - No blob exists under the key
    /// - `BlobError::Io` - The store failed to open the blob
    async fn open(&self, storage_key: &str) -> Result<Box<dyn Blob>, BlobError>;
}

/// Errors that occur while opening blobs.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// No blob exists under the requested key
    #[error("no blob stored under key {storage_key:?}")]
    NotFound { storage_key: String },

    /// Underlying storage failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
