//! In-memory blob store for tests and demo mode.

use std::collections::HashMap;
use std::io;

use async_trait::async_trait;
use bytes::Bytes;

use super::{Blob, BlobError, BlobStore};

/// Holds whole blobs in memory, keyed by storage key.
///
/// Handles are zero-copy slices of the shared backing buffer, so many
/// concurrent readers of one key are cheap.
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, Bytes>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, storage_key: impl Into<String>, data: impl Into<Bytes>) {
        self.blobs.insert(storage_key.into(), data.into());
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn open(&self, storage_key: &str) -> Result<Box<dyn Blob>, BlobError> {
        let data = self
            .blobs
            .get(storage_key)
            .cloned()
            .ok_or_else(|| BlobError::NotFound {
                storage_key: storage_key.to_string(),
            })?;
        Ok(Box::new(MemoryBlob { data, position: 0 }))
    }
}

#[derive(Debug)]
struct MemoryBlob {
    data: Bytes,
    position: u64,
}

#[async_trait]
impl Blob for MemoryBlob {
    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    async fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        self.position = offset;
        Ok(())
    }

    async fn read_chunk(&mut self, max_len: usize) -> io::Result<Bytes> {
        let len = self.data.len() as u64;
        if self.position >= len {
            return Ok(Bytes::new());
        }
        let start = self.position as usize;
        let end = (self.position + max_len as u64).min(len) as usize;
        self.position = end as u64;
        Ok(self.data.slice(start..end))
    }
}
