//! Keeps media files in step with the rows that own them.
//!
//! Row writes are authoritative. File cleanup and resampling that happen
//! around them are best-effort: failures are logged and collected into a
//! [`MediaOutcome`] instead of failing the surrounding operation.

mod profile;
mod recipe;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::media::ImageError;
use crate::storage::{MediaStore, StorageError};

pub use profile::{delete_profile, replace_avatar, save_profile};
pub use recipe::{RecipeDraft, create_recipe, delete_recipe, update_recipe};

#[derive(Debug, Error)]
pub enum MediaError {
    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("image worker failed: {0}")]
    Worker(String),
}

/// A side effect on a media file that did not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaWarning {
    pub path: String,
    pub reason: String,
}

impl fmt::Display for MediaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// Warnings collected from best-effort media work.
#[must_use]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MediaOutcome {
    warnings: Vec<MediaWarning>,
}

impl MediaOutcome {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn warnings(&self) -> &[MediaWarning] {
        &self.warnings
    }

    /// Log and keep a failure.
    pub fn record(&mut self, path: &str, reason: impl fmt::Display) {
        let reason = reason.to_string();
        warn!(path, %reason, "Media side effect failed");
        self.warnings.push(MediaWarning {
            path: path.to_string(),
            reason,
        });
    }

    pub fn merge(&mut self, other: MediaOutcome) {
        self.warnings.extend(other.warnings);
    }
}

/// Media operations bound to a store.
#[derive(Clone)]
pub struct MediaLifecycle {
    store: Arc<dyn MediaStore>,
}

impl MediaLifecycle {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn MediaStore {
        &*self.store
    }

    /// Delete `path`, recording a warning instead of failing.
    pub(crate) async fn discard(&self, path: &str, outcome: &mut MediaOutcome) {
        if let Err(e) = self.store.delete(path).await {
            outcome.record(path, e);
        }
    }
}

/// Run CPU-bound image work off the async executor.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T, MediaError>
where
    F: FnOnce() -> Result<T, ImageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| MediaError::Worker(e.to_string()))?
        .map_err(MediaError::from)
}

/// Check that `bytes` decode as an image.
pub async fn validate_image(bytes: Vec<u8>) -> Result<(), MediaError> {
    run_blocking(move || {
        image::load_from_memory(&bytes)
            .map(|_| ())
            .map_err(ImageError::Decode)
    })
    .await
}
