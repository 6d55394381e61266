use axum::Json;
use axum::extract::{Path, State};
use common::catalog;
use tracing::instrument;

use crate::error::{ApiError, ErrorBody};
use crate::extractors::ApiQuery;
use crate::models::{CategoryQuery, IngredientQuery, RecipeResponse};
use crate::state::AppState;

fn non_empty(rows: Vec<catalog::RecipeRow>) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    if rows.is_empty() {
        return Err(ApiError::NotFound("Recipes not found"));
    }
    Ok(Json(rows.into_iter().map(RecipeResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/recipes/{recipe_name}",
    tag = "Recipes",
    operation_id = "getRecipeByName",
    summary = "Find a recipe by name",
    description = "Returns the newest recipe whose title contains `recipe_name`, ignoring case.",
    params(("recipe_name" = String, Path, description = "Title fragment")),
    responses(
        (status = 200, description = "Matching recipe", body = RecipeResponse),
        (status = 404, description = "No title matches", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn recipe_by_name(
    State(state): State<AppState>,
    Path(recipe_name): Path<String>,
) -> Result<Json<RecipeResponse>, ApiError> {
    catalog::lookup_by_name(&state.db, &recipe_name)
        .await?
        .map(|row| Json(RecipeResponse::from(row)))
        .ok_or(ApiError::NotFound("Recipe not found"))
}

#[utoipa::path(
    get,
    path = "/recipes/by-ingredient",
    tag = "Recipes",
    operation_id = "listRecipesByIngredient",
    summary = "Find recipes by ingredient",
    description = "Returns every recipe whose ingredient list contains `ingredient`, ignoring case, newest first.",
    params(IngredientQuery),
    responses(
        (status = 200, description = "Matching recipes", body = Vec<RecipeResponse>),
        (status = 404, description = "No recipe uses the ingredient", body = ErrorBody),
        (status = 422, description = "Missing `ingredient` parameter", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn recipes_by_ingredient(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<IngredientQuery>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    non_empty(catalog::lookup_by_ingredient(&state.db, &query.ingredient).await?)
}

#[utoipa::path(
    get,
    path = "/recipes/by-category",
    tag = "Recipes",
    operation_id = "listRecipesByCategory",
    summary = "Find recipes by category",
    description = "Returns every recipe in the category named exactly `category`, ignoring case, newest first.",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Recipes in the category", body = Vec<RecipeResponse>),
        (status = 404, description = "No recipes in that category", body = ErrorBody),
        (status = 422, description = "Missing `category` parameter", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn recipes_by_category(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CategoryQuery>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    non_empty(catalog::lookup_by_category(&state.db, &query.category).await?)
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found")
}
