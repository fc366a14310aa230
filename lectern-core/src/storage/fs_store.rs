//! File-system backed blob store.

use std::io::{self, SeekFrom};
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use super::{Blob, BlobError, BlobStore};

/// Serves blobs from files under a content root directory.
///
/// Storage keys are relative paths below the root. Keys that would escape
/// the root resolve to `NotFound`; the store never discloses whether such
/// a path exists.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, storage_key: &str) -> Option<PathBuf> {
        let key_path = Path::new(storage_key);
        let safe = key_path
            .components()
            .all(|part| matches!(part, Component::Normal(_)));
        if !safe || storage_key.is_empty() {
            return None;
        }
        Some(self.root.join(key_path))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn open(&self, storage_key: &str) -> Result<Box<dyn Blob>, BlobError> {
        let not_found = || BlobError::NotFound {
            storage_key: storage_key.to_string(),
        };

        let path = self.resolve(storage_key).ok_or_else(not_found)?;
        let file = match File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(BlobError::Io(e)),
        };
        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(not_found());
        }

        Ok(Box::new(FsBlob {
            file,
            size: metadata.len(),
        }))
    }
}

#[derive(Debug)]
struct FsBlob {
    file: File,
    size: u64,
}

#[async_trait]
impl Blob for FsBlob {
    fn size(&self) -> u64 {
        self.size
    }

    async fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(offset)).await?;
        Ok(())
    }

    async fn read_chunk(&mut self, max_len: usize) -> io::Result<Bytes> {
        let mut buf = vec![0u8; max_len];
        let n = self.file.read(&mut buf).await?;
        buf.truncate(n);
        Ok(Bytes::from(buf))
    }
}
