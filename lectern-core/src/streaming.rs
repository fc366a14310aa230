//! Chunked transfer from blob storage to a response sink.
//!
//! The pipeline reads a bounded window of a blob and yields it as a
//! stream of chunks, so response headers can be flushed before the body
//! and playback can start without loading whole files into memory. The
//! blob handle travels inside the stream: when the sink closes early
//! (player seeked away, client navigated off), dropping the stream drops
//! the handle and releases the underlying resource.

use bytes::Bytes;
use futures::Stream;
use futures::stream;
use tracing::error;

use crate::storage::Blob;

/// Size of chunks read from the blob store.
///
/// Balances per-connection memory against read overhead. Larger chunks
/// reduce overhead but increase memory usage and latency.
const CHUNK_SIZE: u64 = 256 * 1024; // 256KB

/// Streams `length` bytes of `blob` starting at `start`.
///
/// The window must already be validated against the blob size; a blob
/// that ends before the window is exhausted is a storage integrity
/// failure and surfaces as `UnexpectedEof`. Errors after the first chunk
/// reach a sink whose headers are already sent, so they terminate the
/// stream and are logged with the storage key for diagnosis; the status
/// code cannot change at that point.
pub fn read_window(
    blob: Box<dyn Blob>,
    start: u64,
    length: u64,
    storage_key: String,
) -> impl Stream<Item = std::io::Result<Bytes>> + Send {
    stream::try_unfold(
        (blob, length, false, storage_key),
        move |(mut blob, remaining, positioned, storage_key)| async move {
            if remaining == 0 {
                return Ok(None);
            }

            if !positioned {
                if let Err(e) = blob.seek_to(start).await {
                    error!(%storage_key, error = %e, "failed to position blob read");
                    return Err(e);
                }
            }

            let want = remaining.min(CHUNK_SIZE) as usize;
            let chunk = match blob.read_chunk(want).await {
                Ok(chunk) => chunk,
                Err(e) => {
                    error!(%storage_key, error = %e, "blob read failed mid-stream");
                    return Err(e);
                }
            };
            if chunk.is_empty() {
                error!(%storage_key, remaining, "blob ended before the negotiated window");
                return Err(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "blob ended before the negotiated window",
                ));
            }

            let read = chunk.len() as u64;
            Ok(Some((chunk, (blob, remaining - read, true, storage_key))))
        },
    )
}
