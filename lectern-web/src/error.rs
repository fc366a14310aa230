//! Request pipeline errors and their HTTP mapping.
//!
//! Every failure is resolved before any body byte is written, so error
//! responses are always a clean status plus headers. Client-facing bodies
//! stay generic; operator detail goes to the log.

use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use lectern_core::catalog::CourseId;
use lectern_core::entitlement::UserId;
use lectern_core::range::RangeError;
use tracing::{debug, error, warn};

/// Failures while resolving a media request.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// No identity on the request; rejected before any lookup
    #[error("request has no authenticated identity")]
    AuthenticationMissing,

    /// Filename has no catalog entry
    #[error("no catalog entry for {filename:?}")]
    AssetNotFound { filename: String },

    /// Caller is authenticated but lacks the course entitlement
    #[error("user {user_id} has no entitlement for course {course_id}")]
    NotEntitled {
        user_id: UserId,
        course_id: CourseId,
    },

    /// Catalog entry exists but the backing blob does not
    #[error("catalog references missing blob {storage_key:?}")]
    BlobMissing { storage_key: String },

    /// Range header rejected; `total` feeds the `Content-Range: bytes */N` reply
    #[error("range rejected against {total} bytes: {source}")]
    Range {
        total: u64,
        #[source]
        source: RangeError,
    },

    /// Storage failed before any body byte was written
    #[error("storage I/O failure: {0}")]
    Storage(#[from] std::io::Error),
}

impl IntoResponse for MediaError {
    fn into_response(self) -> Response<Body> {
        match self {
            MediaError::AuthenticationMissing => {
                (StatusCode::UNAUTHORIZED, "Authentication required").into_response()
            }
            MediaError::AssetNotFound { filename } => {
                debug!(%filename, "request for unknown media filename");
                (StatusCode::NOT_FOUND, "Not found").into_response()
            }
            MediaError::NotEntitled { user_id, course_id } => {
                debug!(%user_id, %course_id, "entitlement check denied access");
                (StatusCode::FORBIDDEN, "Not entitled").into_response()
            }
            // Same 404 the client sees for an unknown filename, but flagged
            // for operators: the catalog and the blob store disagree.
            MediaError::BlobMissing { storage_key } => {
                warn!(%storage_key, "catalog entry references a missing blob");
                (StatusCode::NOT_FOUND, "Not found").into_response()
            }
            MediaError::Range { total, source } => {
                debug!(error = %source, "rejected range request");
                (
                    StatusCode::RANGE_NOT_SATISFIABLE,
                    [(header::CONTENT_RANGE, format!("bytes */{total}"))],
                    "Range not satisfiable",
                )
                    .into_response()
            }
            MediaError::Storage(e) => {
                error!(error = %e, "storage failure while preparing media response");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(
            MediaError::AuthenticationMissing.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            MediaError::AssetNotFound {
                filename: "x.mp4".into()
            }
            .into_response()
            .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            MediaError::NotEntitled {
                user_id: UserId(1),
                course_id: CourseId(2)
            }
            .into_response()
            .status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            MediaError::BlobMissing {
                storage_key: "k".into()
            }
            .into_response()
            .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            MediaError::Storage(std::io::Error::other("disk gone"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn range_rejection_carries_unsatisfied_content_range() {
        let response = MediaError::Range {
            total: 1000,
            source: RangeError::Unsatisfiable {
                start: 1000,
                total: 1000,
            },
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
        assert_eq!(
            response.headers().get(header::CONTENT_RANGE).unwrap(),
            "bytes */1000"
        );
    }
}
