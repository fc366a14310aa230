//! HTTP byte-range negotiation.
//!
//! Parses an optional `Range` request header against a known total size
//! and computes the response window. Returning 206 with an exact
//! `Content-Range` is what lets video players treat the stream as
//! seekable media rather than a flat download, so the math here is
//! strict: malformed or unsatisfiable headers are rejected instead of
//! being coerced into garbage offsets.

use thiserror::Error;

/// An inclusive byte window over a blob of `total` bytes.
///
/// Invariant: `0 <= start <= end <= total - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
    pub total: u64,
}

impl ByteRange {
    /// Number of bytes in the window.
    pub fn length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Value for the `Content-Range` response header.
    pub fn content_range(&self) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, self.total)
    }
}

/// Negotiated response window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePlan {
    /// No range was requested; serve the whole blob with status 200.
    Full { total: u64 },
    /// A satisfiable range was requested; serve it with status 206.
    Partial(ByteRange),
}

impl RangePlan {
    /// The `(start, length)` window to read from the blob.
    pub fn window(&self) -> (u64, u64) {
        match self {
            RangePlan::Full { total } => (0, *total),
            RangePlan::Partial(range) => (range.start, range.length()),
        }
    }

    /// Number of bytes the response body will carry.
    pub fn content_length(&self) -> u64 {
        self.window().1
    }
}

/// Rejected `Range` headers. Both map to 416 Range Not Satisfiable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Header is not a single well-formed `bytes=<start>[-<end>]` range.
    #[error("malformed range header {header:?}")]
    Malformed { header: String },

    /// Header parsed but the window starts at or past the end of the blob.
    #[error("range start {start} not satisfiable against {total} bytes")]
    Unsatisfiable { start: u64, total: u64 },
}

fn malformed(header: &str) -> RangeError {
    RangeError::Malformed {
        header: header.to_string(),
    }
}

/// Computes the response window for an optional `Range` header.
///
/// Accepts the single-range form `bytes=<start>-<end>` with `<end>`
/// optional; `end` defaults to, and is clamped to, `total - 1`. Suffix
/// ranges (`bytes=-500`), multi-range lists, non-numeric bounds, and
/// inverted windows are rejected as malformed. A start at or beyond
/// `total` is unsatisfiable.
///
/// # Errors
///
/// - `RangeError::Malformed` - The header is not a single numeric range
/// - `RangeError::Unsatisfiable` - `start >= total` (including empty blobs)
pub fn negotiate(header: Option<&str>, total: u64) -> Result<RangePlan, RangeError> {
    let Some(raw) = header else {
        return Ok(RangePlan::Full { total });
    };

    let spec = raw
        .trim()
        .strip_prefix("bytes=")
        .ok_or_else(|| malformed(raw))?;
    if spec.contains(',') {
        return Err(malformed(raw));
    }

    let (start_spec, end_spec) = spec.split_once('-').ok_or_else(|| malformed(raw))?;
    if start_spec.is_empty() {
        return Err(malformed(raw));
    }
    let start: u64 = start_spec.parse().map_err(|_| malformed(raw))?;

    let end: u64 = if end_spec.is_empty() {
        total.saturating_sub(1)
    } else {
        end_spec.parse().map_err(|_| malformed(raw))?
    };
    if end < start {
        return Err(malformed(raw));
    }
    if start >= total {
        return Err(RangeError::Unsatisfiable { start, total });
    }

    Ok(RangePlan::Partial(ByteRange {
        start,
        end: end.min(total - 1),
        total,
    }))
}
