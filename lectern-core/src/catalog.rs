//! Course media catalog.
//!
//! Maps the public filename a player requests to the course that owns the
//! underlying asset. Content authoring lives in an external service; this
//! module only defines the read-only lookup interface plus an in-memory
//! index built from authored content.
//!
//! Resolution is an explicit reverse index (`filename -> owning course`)
//! populated when content is authored. Access control therefore never
//! depends on how storage URLs happen to be shaped.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Identifier of a course in the academy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CourseId(pub u64);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of media asset being requested.
///
/// Videos are streamed inline for playback; resources are delivered as
/// attachment downloads. The two kinds have separate filename namespaces
/// and separate content-type tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Video,
    Resource,
}

/// A catalog entry: the owning course and where the bytes live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    pub owner_course_id: CourseId,
    pub storage_key: String,
    pub kind: AssetKind,
}

/// Read-only lookup from public filenames to catalog entries.
///
/// Implementations are safe for unbounded concurrent reads; the catalog
/// never mutates during request handling.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Resolves a public filename to the asset it names.
    ///
    /// Returns `None` when no authored content references the filename
    /// under the given kind.
    async fn find_owner(&self, filename: &str, kind: AssetKind) -> Option<MediaAsset>;
}

/// In-memory catalog index, populated at startup from authored content.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    videos: HashMap<String, MediaAsset>,
    resources: HashMap<String, MediaAsset>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a lesson video. Lesson videos win over promotional
    /// videos that share a filename.
    pub fn add_lesson_video(
        &mut self,
        course: CourseId,
        filename: impl Into<String>,
        storage_key: impl Into<String>,
    ) {
        self.videos.insert(
            filename.into(),
            MediaAsset {
                owner_course_id: course,
                storage_key: storage_key.into(),
                kind: AssetKind::Video,
            },
        );
    }

    /// Registers a course promotional video. Does not displace a lesson
    /// video already indexed under the same filename.
    pub fn add_promo_video(
        &mut self,
        course: CourseId,
        filename: impl Into<String>,
        storage_key: impl Into<String>,
    ) {
        self.videos
            .entry(filename.into())
            .or_insert_with(|| MediaAsset {
                owner_course_id: course,
                storage_key: storage_key.into(),
                kind: AssetKind::Video,
            });
    }

    /// Registers a downloadable resource.
    pub fn add_resource(
        &mut self,
        course: CourseId,
        filename: impl Into<String>,
        storage_key: impl Into<String>,
    ) {
        self.resources.insert(
            filename.into(),
            MediaAsset {
                owner_course_id: course,
                storage_key: storage_key.into(),
                kind: AssetKind::Resource,
            },
        );
    }

    /// Number of indexed assets across both kinds.
    pub fn asset_count(&self) -> usize {
        self.videos.len() + self.resources.len()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn find_owner(&self, filename: &str, kind: AssetKind) -> Option<MediaAsset> {
        let index = match kind {
            AssetKind::Video => &self.videos,
            AssetKind::Resource => &self.resources,
        };
        index.get(filename).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn find_owner_resolves_lesson_video() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_lesson_video(CourseId(7), "intro.mp4", "courses/7/intro.mp4");

        let asset = catalog
            .find_owner("intro.mp4", AssetKind::Video)
            .await
            .unwrap();
        assert_eq!(asset.owner_course_id, CourseId(7));
        assert_eq!(asset.kind, AssetKind::Video);
        assert_eq!(asset.storage_key, "courses/7/intro.mp4");
    }

    #[tokio::test]
    async fn kinds_have_separate_namespaces() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_resource(CourseId(1), "guide.pdf", "courses/1/guide.pdf");

        assert!(
            catalog
                .find_owner("guide.pdf", AssetKind::Video)
                .await
                .is_none()
        );
        assert!(
            catalog
                .find_owner("guide.pdf", AssetKind::Resource)
                .await
                .is_some()
        );
    }

    #[tokio::test]
    async fn lesson_video_wins_over_promo() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_lesson_video(CourseId(1), "clip.mp4", "courses/1/clip.mp4");
        catalog.add_promo_video(CourseId(2), "clip.mp4", "promos/2/clip.mp4");

        let asset = catalog
            .find_owner("clip.mp4", AssetKind::Video)
            .await
            .unwrap();
        assert_eq!(asset.owner_course_id, CourseId(1));
    }

    #[tokio::test]
    async fn promo_video_fills_gap() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_promo_video(CourseId(2), "teaser.mp4", "promos/2/teaser.mp4");

        let asset = catalog
            .find_owner("teaser.mp4", AssetKind::Video)
            .await
            .unwrap();
        assert_eq!(asset.owner_course_id, CourseId(2));
    }

    #[tokio::test]
    async fn unknown_filename_is_none() {
        let catalog = InMemoryCatalog::new();
        assert!(
            catalog
                .find_owner("missing.mp4", AssetKind::Video)
                .await
                .is_none()
        );
    }
}
