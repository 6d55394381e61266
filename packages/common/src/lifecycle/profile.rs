use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel, Set, TryIntoModel,
};
use tracing::{debug, info};

use super::{MediaError, MediaLifecycle, MediaOutcome, run_blocking};
use crate::entity::profile;
use crate::media::layout::{self, DEFAULT_AVATAR};
use crate::media::{self, AVATAR_EXTENSIONS};

impl MediaLifecycle {
    /// Store an uploaded avatar as-is under a free path for `user_id`.
    pub async fn store_avatar(
        &self,
        user_id: i32,
        filename: &str,
        bytes: &[u8],
    ) -> Result<String, MediaError> {
        let wanted = layout::avatar_path(user_id, filename);
        let path = self.store.available_path(&wanted).await?;
        self.store.put(&path, bytes).await?;
        Ok(path)
    }

    /// Shrink the avatar at `path` to fit 300×300, rewriting it in place.
    ///
    /// The shared default avatar and files without an image extension are
    /// skipped. Returns whether the file was rewritten.
    pub async fn resample_avatar(&self, path: &str) -> Result<bool, MediaError> {
        if path == DEFAULT_AVATAR || !layout::has_extension(path, AVATAR_EXTENSIONS) {
            return Ok(false);
        }

        let extension = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        let bytes = self.store.get(path).await?;

        match run_blocking(move || media::shrink_avatar(&bytes, &extension)).await? {
            Some(smaller) => {
                self.store.put(path, &smaller).await?;
                debug!(path, "Avatar resampled");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Runs after every profile save. Never fails the save.
    pub async fn after_profile_saved(&self, profile: &profile::Model) -> MediaOutcome {
        let mut outcome = MediaOutcome::default();
        if let Err(e) = self.resample_avatar(&profile.image).await {
            outcome.record(&profile.image, e);
        }
        outcome
    }
}

/// Persist a profile, then resample its avatar.
pub async fn save_profile<C: ConnectionTrait>(
    db: &C,
    media: &MediaLifecycle,
    profile: profile::ActiveModel,
) -> Result<(profile::Model, MediaOutcome), DbErr> {
    let model = profile.save(db).await?.try_into_model()?;
    let outcome = media.after_profile_saved(&model).await;
    Ok((model, outcome))
}

/// Point the profile at a newly stored avatar and drop the one it owned before.
pub async fn replace_avatar<C: ConnectionTrait>(
    db: &C,
    media: &MediaLifecycle,
    profile: profile::Model,
    new_image: String,
) -> Result<(profile::Model, MediaOutcome), DbErr> {
    let previous = profile.image.clone();

    let mut active = profile.into_active_model();
    active.image = Set(new_image);
    let (model, mut outcome) = save_profile(db, media, active).await?;

    if previous != model.image && previous != DEFAULT_AVATAR {
        media.discard(&previous, &mut outcome).await;
    }
    Ok((model, outcome))
}

/// Remove the profile's own avatar file, then the row.
pub async fn delete_profile<C: ConnectionTrait>(
    db: &C,
    media: &MediaLifecycle,
    profile: profile::Model,
) -> Result<MediaOutcome, DbErr> {
    let mut outcome = MediaOutcome::default();
    if profile.image != DEFAULT_AVATAR {
        media.discard(&profile.image, &mut outcome).await;
    }

    profile::Entity::delete_by_id(profile.id).exec(db).await?;
    info!(user_id = profile.user_id, "Profile deleted");
    Ok(outcome)
}
