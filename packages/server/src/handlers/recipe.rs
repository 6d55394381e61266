use axum::extract::{Multipart, Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use common::catalog::{self, RecipeScope};
use common::entity::recipe;
use common::lifecycle::{self, MediaError};
use tracing::{instrument, warn};

use super::{INVALID_IMAGE, PageQuery, load_account, parse_id, report};
use crate::error::AppError;
use crate::extractors::page::PageContext;
use crate::extractors::session::CurrentUser;
use crate::models::form::MultipartForm;
use crate::models::recipe::RecipeForm;
use crate::pages::{
    RecipeDeletePage, RecipeDetailPage, RecipeFormPage, RecipeFormValues, RecipeListPage,
    RecipeView, media_url,
};
use crate::state::AppState;
use crate::utils::flash::{self, FlashMessage};

#[instrument(skip(state, ctx, query))]
pub async fn home(
    State(state): State<AppState>,
    ctx: PageContext,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let page = catalog::recipe_page(&state.db, RecipeScope::All, query.number()?)
        .await?
        .ok_or(AppError::NotFound)?;
    ctx.render(|layout| RecipeListPage::new(layout, "Latest recipes", &page))
}

#[instrument(skip(state, ctx, query))]
pub async fn user_recipes(
    State(state): State<AppState>,
    Path(username): Path<String>,
    ctx: PageContext,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let author = catalog::find_user_by_username(&state.db, &username)
        .await?
        .ok_or(AppError::NotFound)?;
    let page = catalog::recipe_page(&state.db, RecipeScope::Author(author.id), query.number()?)
        .await?
        .ok_or(AppError::NotFound)?;
    ctx.render(|layout| {
        RecipeListPage::new(layout, format!("Recipes by {}", author.username), &page)
    })
}

#[instrument(skip(state, ctx, query))]
pub async fn category_recipes(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: PageContext,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let category = catalog::find_category(&state.db, parse_id(&id)?)
        .await?
        .ok_or(AppError::NotFound)?;
    let page = catalog::recipe_page(&state.db, RecipeScope::Category(category.id), query.number()?)
        .await?
        .ok_or(AppError::NotFound)?;
    ctx.render(|layout| RecipeListPage::new(layout, category.name.clone(), &page))
}

#[instrument(skip(state, ctx))]
pub async fn recipe_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: PageContext,
) -> Result<Response, AppError> {
    let row = catalog::find_recipe(&state.db, parse_id(&id)?)
        .await?
        .ok_or(AppError::NotFound)?;
    let can_edit = ctx
        .user
        .as_ref()
        .is_some_and(|u| u.user_id == row.recipe.author_id);
    ctx.render(|layout| RecipeDetailPage {
        layout,
        recipe: RecipeView::from(&row),
        can_edit,
    })
}

pub async fn new_recipe_form(_user: CurrentUser, ctx: PageContext) -> Result<Response, AppError> {
    ctx.render(|layout| {
        RecipeFormPage::new(
            layout,
            "New recipe",
            "/recipe/new/".into(),
            RecipeFormValues::new_recipe(),
            vec![],
            None,
        )
    })
}

#[instrument(skip_all, fields(user_id = user.user_id))]
pub async fn create_recipe(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ctx: PageContext,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let author = load_account(&state, user.user_id, "/recipe/new/").await?;
    let form = RecipeForm::from_multipart(MultipartForm::read(multipart).await?);

    let mut errors = Vec::new();
    let draft = form
        .validate(&ctx.layout.categories)
        .map_err(|e| errors.extend(e))
        .ok();
    if form.image.is_none() {
        errors.push("A photo of the dish is required".to_string());
    }

    let (Some(mut draft), Some(image)) = (draft, form.image.as_ref()) else {
        return rerender_new(ctx, form.values, errors);
    };

    let today = chrono::Utc::now().date_naive();
    let path = match state
        .media
        .store_recipe_image(author.id, today, &image.filename, image.bytes.clone())
        .await
    {
        Ok(path) => path,
        Err(MediaError::Image(_)) => {
            return rerender_new(ctx, form.values, vec![INVALID_IMAGE.to_string()]);
        }
        Err(e) => return Err(AppError::Internal(format!("Storing recipe image: {e}"))),
    };

    draft.title = draft.title.to_uppercase();
    let recipe = match lifecycle::create_recipe(&state.db, author.id, draft, path.clone()).await
    {
        Ok(recipe) => recipe,
        Err(e) => {
            if let Err(cleanup) = state.media.store().delete(&path).await {
                warn!(path, error = %cleanup, "Could not remove orphaned recipe image");
            }
            return Err(e.into());
        }
    };

    let jar = flash::push(ctx.into_jar(), FlashMessage::success("Recipe added."));
    Ok((jar, Redirect::to(&format!("/recipe/{}/", recipe.id))).into_response())
}

fn rerender_new(
    ctx: PageContext,
    values: RecipeFormValues,
    errors: Vec<String>,
) -> Result<Response, AppError> {
    ctx.render(|layout| {
        RecipeFormPage::new(layout, "New recipe", "/recipe/new/".into(), values, errors, None)
    })
}

/// The recipe at `id`, provided `user_id` wrote it.
async fn load_own_recipe(
    state: &AppState,
    id: &str,
    user_id: i32,
) -> Result<recipe::Model, AppError> {
    let row = catalog::find_recipe(&state.db, parse_id(id)?)
        .await?
        .ok_or(AppError::NotFound)?;
    if row.recipe.author_id != user_id {
        return Err(AppError::PermissionDenied);
    }
    Ok(row.recipe)
}

#[instrument(skip(state, user, ctx))]
pub async fn edit_recipe_form(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: PageContext,
) -> Result<Response, AppError> {
    let recipe = load_own_recipe(&state, &id, user.user_id).await?;
    ctx.render(|layout| {
        RecipeFormPage::new(
            layout,
            "Edit recipe",
            format!("/recipe/{}/update/", recipe.id),
            RecipeFormValues::from_model(&recipe),
            vec![],
            Some(media_url(&recipe.image)),
        )
    })
}

#[instrument(skip(state, user, ctx, multipart), fields(user_id = user.user_id))]
pub async fn update_recipe(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: PageContext,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let existing = load_own_recipe(&state, &id, user.user_id).await?;
    let form = RecipeForm::from_multipart(MultipartForm::read(multipart).await?);

    let rerender = |ctx: PageContext, values: RecipeFormValues, errors: Vec<String>| {
        ctx.render(|layout| {
            RecipeFormPage::new(
                layout,
                "Edit recipe",
                format!("/recipe/{}/update/", existing.id),
                values,
                errors,
                Some(media_url(&existing.image)),
            )
        })
    };

    let mut draft = match form.validate(&ctx.layout.categories) {
        Ok(draft) => draft,
        Err(errors) => return rerender(ctx, form.values, errors),
    };

    let new_image = match &form.image {
        Some(image) => {
            let today = chrono::Utc::now().date_naive();
            match state
                .media
                .store_recipe_image(user.user_id, today, &image.filename, image.bytes.clone())
                .await
            {
                Ok(path) => Some(path),
                Err(MediaError::Image(_)) => {
                    return rerender(ctx, form.values, vec![INVALID_IMAGE.to_string()]);
                }
                Err(e) => return Err(AppError::Internal(format!("Storing recipe image: {e}"))),
            }
        }
        None => None,
    };

    draft.title = draft.title.to_uppercase();
    let (recipe, outcome) =
        lifecycle::update_recipe(&state.db, &state.media, existing, draft, new_image).await?;
    report(outcome, "update_recipe");

    let jar = flash::push(ctx.into_jar(), FlashMessage::success("Recipe updated."));
    Ok((jar, Redirect::to(&format!("/recipe/{}/", recipe.id))).into_response())
}

#[instrument(skip(state, user, ctx))]
pub async fn delete_recipe_confirm(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: PageContext,
) -> Result<Response, AppError> {
    let recipe = load_own_recipe(&state, &id, user.user_id).await?;
    ctx.render(|layout| RecipeDeletePage {
        layout,
        recipe_id: recipe.id,
        title: recipe.title,
    })
}

#[instrument(skip(state, user, ctx), fields(user_id = user.user_id))]
pub async fn delete_recipe(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: PageContext,
) -> Result<Response, AppError> {
    let recipe = load_own_recipe(&state, &id, user.user_id).await?;
    let outcome = lifecycle::delete_recipe(&state.db, &state.media, recipe).await?;
    report(outcome, "delete_recipe");

    let jar = flash::push(ctx.into_jar(), FlashMessage::success("Recipe deleted."));
    Ok((jar, Redirect::to("/")).into_response())
}
