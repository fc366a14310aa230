//! Media delivery handlers.
//!
//! Both endpoints walk the same pipeline: authenticate the caller,
//! resolve the filename to its owning course, authorize against
//! entitlements, negotiate the byte window, pick the content type, then
//! stream the blob. The order is load-bearing: anonymous callers are
//! rejected before any lookup, and unknown filenames 404 for every
//! identity before entitlements are consulted.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use lectern_core::catalog::{AssetKind, MediaAsset};
use lectern_core::entitlement::authorize;
use lectern_core::media_type::content_type_for;
use lectern_core::range::{RangeError, RangePlan, negotiate};
use lectern_core::storage::{Blob, BlobError};
use lectern_core::streaming::read_window;
use tracing::debug;

use crate::auth::authenticate;
use crate::error::MediaError;
use crate::server::AppState;

/// `GET /media/video/{filename}` - stream a lesson or promo video.
pub async fn stream_video(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    headers: HeaderMap,
) -> Result<Response, MediaError> {
    serve_media(&state, AssetKind::Video, &filename, &headers).await
}

/// `GET /media/file/{filename}` - download a course resource.
pub async fn download_resource(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    headers: HeaderMap,
) -> Result<Response, MediaError> {
    let mut response = serve_media(&state, AssetKind::Resource, &filename, &headers).await?;
    response
        .headers_mut()
        .insert(header::CONTENT_DISPOSITION, attachment_disposition(&filename));
    Ok(response)
}

async fn serve_media(
    state: &AppState,
    kind: AssetKind,
    filename: &str,
    headers: &HeaderMap,
) -> Result<Response, MediaError> {
    state.stats.record_request();

    let identity = authenticate(state.auth.as_ref(), headers)
        .await
        .ok_or(MediaError::AuthenticationMissing)?;

    let asset = state
        .catalog
        .find_owner(filename, kind)
        .await
        .ok_or_else(|| MediaError::AssetNotFound {
            filename: filename.to_string(),
        })?;

    let decision = authorize(state.entitlements.as_ref(), &identity, asset.owner_course_id).await;
    if !decision.allowed {
        return Err(MediaError::NotEntitled {
            user_id: identity.user_id,
            course_id: asset.owner_course_id,
        });
    }

    let blob = match state.blobs.open(&asset.storage_key).await {
        Ok(blob) => blob,
        Err(BlobError::NotFound { storage_key }) => {
            return Err(MediaError::BlobMissing { storage_key });
        }
        Err(BlobError::Io(e)) => return Err(MediaError::Storage(e)),
    };

    let total = blob.size();
    let raw_range = range_header(headers).map_err(|source| MediaError::Range { total, source })?;
    let plan = negotiate(raw_range, total).map_err(|source| MediaError::Range { total, source })?;

    debug!(
        %filename,
        user = %identity.user_id,
        course = %asset.owner_course_id,
        reason = decision.reason,
        length = plan.content_length(),
        "streaming media"
    );

    Ok(stream_response(state, &asset, kind, filename, plan, blob))
}

/// Builds the success response: headers first, then the chunked body.
fn stream_response(
    state: &AppState,
    asset: &MediaAsset,
    kind: AssetKind,
    filename: &str,
    plan: RangePlan,
    blob: Box<dyn Blob>,
) -> Response {
    let (start, length) = plan.window();
    let stats = state.stats.clone();
    let stream = read_window(blob, start, length, asset.storage_key.clone()).map(move |chunk| {
        if let Ok(bytes) = &chunk {
            stats.record_streamed(bytes.len() as u64);
        }
        chunk
    });

    let mut builder = Response::builder()
        .header(header::CONTENT_TYPE, content_type_for(kind, filename))
        .header(header::ACCEPT_RANGES, "bytes")
        .header(header::CONTENT_LENGTH, plan.content_length().to_string())
        .header(header::CACHE_CONTROL, "no-cache");
    builder = match plan {
        RangePlan::Full { .. } => builder.status(StatusCode::OK),
        RangePlan::Partial(range) => builder
            .status(StatusCode::PARTIAL_CONTENT)
            .header(header::CONTENT_RANGE, range.content_range()),
    };

    builder
        .body(Body::from_stream(stream))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn range_header(headers: &HeaderMap) -> Result<Option<&str>, RangeError> {
    match headers.get(header::RANGE) {
        None => Ok(None),
        Some(value) => value.to_str().map(Some).map_err(|_| RangeError::Malformed {
            header: format!("{value:?}"),
        }),
    }
}

fn attachment_disposition(filename: &str) -> HeaderValue {
    HeaderValue::try_from(format!("attachment; filename=\"{filename}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
