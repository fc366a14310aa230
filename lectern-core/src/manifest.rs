//! Authored library manifest.
//!
//! In production the catalog, grants, and identities come from the
//! course-content, payment, and auth services. For development and tests
//! the same data is authored as a JSON manifest and loaded into the
//! in-memory stores at startup.
//!
//! ```json
//! {
//!   "courses": [{
//!     "id": 1,
//!     "title": "Rust from scratch",
//!     "promo_videos": [{"filename": "teaser.mp4", "storage_key": "promos/1/teaser.mp4"}],
//!     "lessons": [{"title": "Hello", "video": {"filename": "hello.mp4", "storage_key": "courses/1/hello.mp4"}}],
//!     "resources": [{"filename": "slides.pdf", "storage_key": "courses/1/slides.pdf"}]
//!   }],
//!   "entitlements": [{"user_id": 42, "course_id": 1, "granted_at": "2026-01-05T12:00:00Z"}],
//!   "tokens": [{"token": "s3cret", "user_id": 42, "role": "user"}]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::catalog::{CourseId, InMemoryCatalog};
use crate::entitlement::{Entitlement, Identity, InMemoryEntitlements, Role, UserId};

/// Top-level manifest document.
#[derive(Debug, Deserialize)]
pub struct LibraryManifest {
    pub courses: Vec<CourseEntry>,
    #[serde(default)]
    pub entitlements: Vec<EntitlementEntry>,
    #[serde(default)]
    pub tokens: Vec<TokenEntry>,
}

/// A course and the media it owns.
#[derive(Debug, Deserialize)]
pub struct CourseEntry {
    pub id: CourseId,
    pub title: String,
    #[serde(default)]
    pub promo_videos: Vec<AssetEntry>,
    #[serde(default)]
    pub lessons: Vec<LessonEntry>,
    #[serde(default)]
    pub resources: Vec<AssetEntry>,
}

/// A lesson with its video asset.
#[derive(Debug, Deserialize)]
pub struct LessonEntry {
    pub title: String,
    pub video: AssetEntry,
}

/// Public filename plus the key the bytes are stored under.
#[derive(Debug, Deserialize)]
pub struct AssetEntry {
    pub filename: String,
    pub storage_key: String,
}

/// A purchase grant row.
#[derive(Debug, Deserialize)]
pub struct EntitlementEntry {
    pub user_id: UserId,
    pub course_id: CourseId,
    #[serde(default = "Utc::now")]
    pub granted_at: DateTime<Utc>,
}

/// A pre-issued auth token and the identity it resolves to.
#[derive(Debug, Deserialize)]
pub struct TokenEntry {
    pub token: String,
    pub user_id: UserId,
    pub role: Role,
}

/// Errors loading a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LibraryManifest {
    /// Loads and parses a manifest file.
    ///
    /// # Errors
    ///
    /// - `ManifestError::Io` - The file could not be read
    /// - `ManifestError::Parse` - The file is not a valid manifest
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Parses a manifest from a JSON string.
    ///
    /// # Errors
    ///
    /// - `ManifestError::Parse` - The document is not a valid manifest
    pub fn from_json(raw: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Builds the filename index. Lessons are indexed before promo
    /// videos so lesson videos win shared filenames.
    pub fn build_catalog(&self) -> InMemoryCatalog {
        let mut catalog = InMemoryCatalog::new();
        for course in &self.courses {
            for lesson in &course.lessons {
                catalog.add_lesson_video(
                    course.id,
                    &lesson.video.filename,
                    &lesson.video.storage_key,
                );
            }
            for resource in &course.resources {
                catalog.add_resource(course.id, &resource.filename, &resource.storage_key);
            }
        }
        for course in &self.courses {
            for promo in &course.promo_videos {
                catalog.add_promo_video(course.id, &promo.filename, &promo.storage_key);
            }
        }
        debug!(
            courses = self.courses.len(),
            assets = catalog.asset_count(),
            "catalog built from manifest"
        );
        catalog
    }

    /// Builds the grant table.
    pub fn build_entitlements(&self) -> InMemoryEntitlements {
        let mut store = InMemoryEntitlements::new();
        for entry in &self.entitlements {
            store.grant(Entitlement {
                user_id: entry.user_id,
                course_id: entry.course_id,
                granted_at: entry.granted_at,
            });
        }
        store
    }

    /// Builds the token to identity map consumed by the auth layer.
    pub fn build_token_map(&self) -> HashMap<String, Identity> {
        self.tokens
            .iter()
            .map(|entry| {
                (
                    entry.token.clone(),
                    Identity {
                        user_id: entry.user_id,
                        role: entry.role,
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::{AssetKind, CatalogStore};
    use crate::entitlement::EntitlementStore;

    use super::*;

    const MANIFEST: &str = r#"{
        "courses": [
            {
                "id": 1,
                "title": "Rust from scratch",
                "promo_videos": [
                    {"filename": "teaser.mp4", "storage_key": "promos/1/teaser.mp4"}
                ],
                "lessons": [
                    {"title": "Hello", "video": {"filename": "hello.mp4", "storage_key": "courses/1/hello.mp4"}}
                ],
                "resources": [
                    {"filename": "slides.pdf", "storage_key": "courses/1/slides.pdf"}
                ]
            },
            {
                "id": 2,
                "title": "Advanced ownership"
            }
        ],
        "entitlements": [
            {"user_id": 42, "course_id": 1, "granted_at": "2026-01-05T12:00:00Z"},
            {"user_id": 42, "course_id": 2}
        ],
        "tokens": [
            {"token": "user-token", "user_id": 42, "role": "user"},
            {"token": "admin-token", "user_id": 1, "role": "admin"}
        ]
    }"#;

    #[tokio::test]
    async fn builds_catalog_from_manifest() {
        let manifest = LibraryManifest::from_json(MANIFEST).unwrap();
        let catalog = manifest.build_catalog();

        assert_eq!(catalog.asset_count(), 3);
        let lesson = catalog
            .find_owner("hello.mp4", AssetKind::Video)
            .await
            .unwrap();
        assert_eq!(lesson.owner_course_id, CourseId(1));
        assert_eq!(lesson.storage_key, "courses/1/hello.mp4");

        let promo = catalog
            .find_owner("teaser.mp4", AssetKind::Video)
            .await
            .unwrap();
        assert_eq!(promo.owner_course_id, CourseId(1));

        let resource = catalog
            .find_owner("slides.pdf", AssetKind::Resource)
            .await
            .unwrap();
        assert_eq!(resource.kind, AssetKind::Resource);
    }

    #[tokio::test]
    async fn builds_entitlements_with_defaulted_timestamp() {
        let manifest = LibraryManifest::from_json(MANIFEST).unwrap();
        let store = manifest.build_entitlements();

        assert_eq!(store.grant_count(), 2);
        assert!(store.has(UserId(42), CourseId(1)).await);
        assert!(store.has(UserId(42), CourseId(2)).await);
        assert!(!store.has(UserId(7), CourseId(1)).await);
    }

    #[test]
    fn builds_token_map() {
        let manifest = LibraryManifest::from_json(MANIFEST).unwrap();
        let tokens = manifest.build_token_map();

        assert_eq!(tokens["user-token"].user_id, UserId(42));
        assert_eq!(tokens["user-token"].role, Role::User);
        assert_eq!(tokens["admin-token"].role, Role::Admin);
    }

    #[test]
    fn rejects_malformed_manifest() {
        assert!(matches!(
            LibraryManifest::from_json("{\"courses\": 3}"),
            Err(ManifestError::Parse(_))
        ));
    }
}
