use common::catalog::RecipeRow;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A recipe, flattened for API clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeResponse {
    #[schema(example = "BORSCHT DELUXE")]
    pub title: String,
    /// Category name.
    #[schema(example = "Soups")]
    pub category: String,
    pub description: String,
    pub ingredients: String,
    pub cooking_steps: String,
    /// `H:MM:SS`, prefixed with a day count for long recipes.
    #[schema(example = "1:30:00")]
    pub cooking_time: String,
    /// Media path of the photo.
    #[schema(example = "users_media/upload/user_1/2024-03-01/borscht.jpg")]
    pub image: String,
    /// Media path of the derived thumbnail.
    #[schema(example = "CACHE/thumbnails/users_media/upload/user_1/2024-03-01/borscht.jpg")]
    pub image_thumbnail: String,
    /// Author's username.
    #[schema(example = "anna")]
    pub author: String,
    pub active: bool,
    /// RFC 3339 timestamp.
    #[schema(example = "2024-03-01T12:00:00+00:00")]
    pub created_date: String,
}

impl From<RecipeRow> for RecipeResponse {
    fn from(row: RecipeRow) -> Self {
        let RecipeRow {
            recipe,
            category,
            author,
        } = row;
        Self {
            cooking_time: recipe.cooking_time().to_string(),
            image_thumbnail: recipe.thumbnail_path(),
            created_date: recipe.created_date.to_rfc3339(),
            title: recipe.title,
            category: category.name,
            description: recipe.description,
            ingredients: recipe.ingredients,
            cooking_steps: recipe.cooking_steps,
            image: recipe.image,
            author: author.username,
            active: recipe.active,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IngredientQuery {
    /// Fragment to look for in the ingredient list, case-insensitive.
    pub ingredient: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryQuery {
    /// Exact category name, case-insensitive.
    pub category: String,
}
