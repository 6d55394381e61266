use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::Response;
use common::lifecycle::MediaError;
use common::media::layout::{thumbnail_source, validate_media_path};
use common::storage::StorageError;
use tracing::{debug, instrument};

use crate::error::AppError;
use crate::state::AppState;

/// Serve a stored media file. Thumbnail paths are derived from their
/// source photo on first read.
#[instrument(skip(state))]
pub async fn serve_media(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, AppError> {
    let path = validate_media_path(&path).map_err(|reason| {
        debug!(reason, "Rejected media path");
        AppError::NotFound
    })?;

    let content = match thumbnail_source(path) {
        Some(source) => state.media.recipe_thumbnail(source).await,
        None => state.media.store().get(path).await.map_err(MediaError::from),
    }
    .map_err(media_error)?;

    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Response::builder()
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from(content))
        .map_err(|e| AppError::Internal(e.to_string()))
}

fn media_error(err: MediaError) -> AppError {
    match err {
        MediaError::Storage(StorageError::NotFound(_) | StorageError::InvalidPath(_)) => {
            AppError::NotFound
        }
        // A thumbnail of something that is not a picture does not exist.
        MediaError::Image(e) => {
            debug!(error = %e, "Thumbnail source is not an image");
            AppError::NotFound
        }
        e => AppError::Internal(format!("Reading media: {e}")),
    }
}
