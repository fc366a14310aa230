//! Extension to MIME type tables for served media.
//!
//! Static tables, one per asset kind. Unknown extensions fall back to the
//! kind's default rather than guessing from content.

use std::path::Path;

use crate::catalog::AssetKind;

/// Returns the `Content-Type` for a filename of the given kind.
pub fn content_type_for(kind: AssetKind, filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match kind {
        AssetKind::Video => video_content_type(extension.as_deref()),
        AssetKind::Resource => resource_content_type(extension.as_deref()),
    }
}

fn video_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("ogg") => "video/ogg",
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        _ => "video/mp4",
    }
}

fn resource_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("zip") => "application/zip",
        Some("rar") => "application/x-rar-compressed",
        Some("7z") => "application/x-7z-compressed",
        Some("txt") => "text/plain",
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        }
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_extensions() {
        assert_eq!(content_type_for(AssetKind::Video, "movie.mp4"), "video/mp4");
        assert_eq!(content_type_for(AssetKind::Video, "clip.webm"), "video/webm");
        assert_eq!(
            content_type_for(AssetKind::Video, "old.MOV"),
            "video/quicktime"
        );
        assert_eq!(
            content_type_for(AssetKind::Video, "legacy.avi"),
            "video/x-msvideo"
        );
    }

    #[test]
    fn video_default_is_mp4() {
        assert_eq!(content_type_for(AssetKind::Video, "lesson.mkv"), "video/mp4");
        assert_eq!(content_type_for(AssetKind::Video, "noextension"), "video/mp4");
    }

    #[test]
    fn resource_extensions() {
        assert_eq!(
            content_type_for(AssetKind::Resource, "guide.pdf"),
            "application/pdf"
        );
        assert_eq!(
            content_type_for(AssetKind::Resource, "notes.docx"),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(
            content_type_for(AssetKind::Resource, "archive.7z"),
            "application/x-7z-compressed"
        );
        assert_eq!(
            content_type_for(AssetKind::Resource, "sheet.XLSX"),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
    }

    #[test]
    fn resource_default_is_octet_stream() {
        assert_eq!(
            content_type_for(AssetKind::Resource, "data.bin"),
            "application/octet-stream"
        );
    }
}
