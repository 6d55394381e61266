use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel, Set};
use tracing::info;

use super::{MediaError, MediaLifecycle, MediaOutcome, run_blocking};
use crate::CookingTime;
use crate::entity::recipe;
use crate::media::{self, layout};
use crate::storage::StorageError;

/// User-editable recipe fields.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub title: String,
    pub category_id: i32,
    pub description: String,
    pub ingredients: String,
    pub cooking_steps: String,
    pub cooking_time: CookingTime,
    pub active: bool,
}

impl MediaLifecycle {
    /// Resample an uploaded dish photo and store it under a free path.
    ///
    /// Returns the stored media path.
    pub async fn store_recipe_image(
        &self,
        author_id: i32,
        date: NaiveDate,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<String, MediaError> {
        let jpeg = run_blocking(move || media::process_recipe_image(&bytes)).await?;
        let wanted = layout::recipe_image_path(author_id, date, filename);
        let path = self.store.available_path(&wanted).await?;
        self.store.put(&path, &jpeg).await?;
        Ok(path)
    }

    /// Thumbnail bytes for a recipe photo, derived and cached on first read.
    ///
    /// Anything outside the recipe photo tree is refused, since no lifecycle
    /// would ever clean up its thumbnail.
    pub async fn recipe_thumbnail(&self, image_path: &str) -> Result<Vec<u8>, MediaError> {
        if !layout::is_recipe_image(image_path) {
            return Err(StorageError::InvalidPath(format!(
                "no thumbnails for {image_path}"
            ))
            .into());
        }
        let thumb_path = layout::thumbnail_path(image_path);
        match self.store.get(&thumb_path).await {
            Ok(bytes) => return Ok(bytes),
            Err(StorageError::NotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }

        let source = self.store.get(image_path).await?;
        let thumb = run_blocking(move || media::make_thumbnail(&source)).await?;
        self.store.put(&thumb_path, &thumb).await?;
        Ok(thumb)
    }

    async fn discard_recipe_image(&self, image_path: &str, outcome: &mut MediaOutcome) {
        self.discard(image_path, outcome).await;
        self.discard(&layout::thumbnail_path(image_path), outcome)
            .await;
    }
}

/// Insert a recipe whose photo is already stored at `image`.
pub async fn create_recipe<C: ConnectionTrait>(
    db: &C,
    author_id: i32,
    draft: RecipeDraft,
    image: String,
) -> Result<recipe::Model, DbErr> {
    let model = recipe::ActiveModel {
        title: Set(draft.title),
        category_id: Set(draft.category_id),
        description: Set(draft.description),
        ingredients: Set(draft.ingredients),
        cooking_steps: Set(draft.cooking_steps),
        cooking_time: Set(draft.cooking_time.as_secs()),
        image: Set(image),
        author_id: Set(author_id),
        active: Set(draft.active),
        created_date: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(recipe_id = model.id, author_id, "Recipe created");
    Ok(model)
}

/// Apply `draft` to `existing`, optionally switching to a freshly stored photo.
///
/// A superseded photo and its thumbnail are removed before the row is
/// written. If the write fails, the new photo is removed again.
pub async fn update_recipe<C: ConnectionTrait>(
    db: &C,
    media: &MediaLifecycle,
    existing: recipe::Model,
    draft: RecipeDraft,
    new_image: Option<String>,
) -> Result<(recipe::Model, MediaOutcome), DbErr> {
    let mut outcome = MediaOutcome::default();
    let new_image = new_image.filter(|path| *path != existing.image);

    if new_image.is_some() {
        media.discard_recipe_image(&existing.image, &mut outcome).await;
    }

    let mut active = existing.into_active_model();
    active.title = Set(draft.title);
    active.category_id = Set(draft.category_id);
    active.description = Set(draft.description);
    active.ingredients = Set(draft.ingredients);
    active.cooking_steps = Set(draft.cooking_steps);
    active.cooking_time = Set(draft.cooking_time.as_secs());
    active.active = Set(draft.active);
    if let Some(path) = &new_image {
        active.image = Set(path.clone());
    }

    match active.update(db).await {
        Ok(model) => {
            info!(recipe_id = model.id, "Recipe updated");
            Ok((model, outcome))
        }
        Err(e) => {
            if let Some(path) = &new_image {
                media.discard(path, &mut outcome).await;
            }
            Err(e)
        }
    }
}

/// Remove a recipe's photo and thumbnail, then its row.
pub async fn delete_recipe<C: ConnectionTrait>(
    db: &C,
    media: &MediaLifecycle,
    recipe: recipe::Model,
) -> Result<MediaOutcome, DbErr> {
    let mut outcome = MediaOutcome::default();
    media.discard_recipe_image(&recipe.image, &mut outcome).await;

    recipe::Entity::delete_by_id(recipe.id).exec(db).await?;
    info!(recipe_id = recipe.id, "Recipe deleted");
    Ok(outcome)
}
