//! Lectern Core - Entitlement-gated media delivery building blocks
//!
//! This crate provides the domain model and streaming primitives for the
//! Lectern course platform: the asset catalog, entitlement checks, HTTP
//! byte-range negotiation, blob storage, and the chunked transfer pipeline.
//! The HTTP surface itself lives in `lectern-web`.

pub mod catalog;
pub mod config;
pub mod entitlement;
pub mod manifest;
pub mod media_type;
pub mod range;
pub mod storage;
pub mod streaming;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use catalog::{AssetKind, CatalogStore, CourseId, InMemoryCatalog, MediaAsset};
pub use entitlement::{AccessDecision, EntitlementStore, Identity, Role, UserId, authorize};
pub use manifest::{LibraryManifest, ManifestError};
pub use range::{ByteRange, RangeError, RangePlan, negotiate};
pub use storage::{Blob, BlobError, BlobStore, FsBlobStore, MemoryBlobStore};
