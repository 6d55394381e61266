//! Askama page templates and the view models they render.

use askama::Template;
use axum::http::StatusCode;
use common::catalog::{Page, RecipeRow};
use common::entity::category;

use crate::utils::flash::FlashMessage;

const DATE_FORMAT: &str = "%B %-d, %Y %H:%M";

/// Data every page's base layout reads.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub categories: Vec<category::Model>,
    pub username: Option<String>,
    pub flashes: Vec<FlashMessage>,
}

impl Layout {
    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }
}

pub fn media_url(path: &str) -> String {
    format!("/media/{path}")
}

/// Summary shown in listings.
#[derive(Debug, Clone)]
pub struct RecipeCard {
    pub id: i32,
    pub title: String,
    pub thumbnail_url: String,
    pub author: String,
    pub category: String,
    pub category_id: i32,
    pub created: String,
    pub minutes: i64,
    pub description: String,
}

impl From<&RecipeRow> for RecipeCard {
    fn from(row: &RecipeRow) -> Self {
        Self {
            id: row.recipe.id,
            title: row.recipe.title.clone(),
            thumbnail_url: media_url(&row.recipe.thumbnail_path()),
            author: row.author.username.clone(),
            category: row.category.name.clone(),
            category_id: row.category.id,
            created: row.recipe.created_date.format(DATE_FORMAT).to_string(),
            minutes: row.recipe.cooking_time().total_minutes(),
            description: row.recipe.description.clone(),
        }
    }
}

/// Page links for a listing.
#[derive(Debug, Clone, Copy)]
pub struct Pager {
    pub number: u64,
    pub total_pages: u64,
}

impl Pager {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn previous(&self) -> u64 {
        self.number.saturating_sub(1)
    }

    pub fn next(&self) -> u64 {
        self.number + 1
    }

    pub fn is_paginated(&self) -> bool {
        self.total_pages > 1
    }
}

impl<T> From<&Page<T>> for Pager {
    fn from(page: &Page<T>) -> Self {
        Self {
            number: page.number,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Template)]
#[template(path = "recipe_list.html")]
pub struct RecipeListPage {
    pub layout: Layout,
    pub heading: String,
    pub cards: Vec<RecipeCard>,
    pub pager: Pager,
}

impl RecipeListPage {
    pub fn new(layout: Layout, heading: impl Into<String>, page: &Page<RecipeRow>) -> Self {
        Self {
            layout,
            heading: heading.into(),
            cards: page.items.iter().map(RecipeCard::from).collect(),
            pager: Pager::from(page),
        }
    }
}

/// Full recipe for the detail page.
#[derive(Debug, Clone)]
pub struct RecipeView {
    pub id: i32,
    pub title: String,
    pub image_url: String,
    pub category: String,
    pub category_id: i32,
    pub author: String,
    pub created: String,
    pub description: String,
    pub ingredients: String,
    pub cooking_steps: String,
    pub cooking_time: String,
    pub active: bool,
}

impl From<&RecipeRow> for RecipeView {
    fn from(row: &RecipeRow) -> Self {
        let recipe = &row.recipe;
        Self {
            id: recipe.id,
            title: recipe.title.clone(),
            image_url: media_url(&recipe.image),
            category: row.category.name.clone(),
            category_id: row.category.id,
            author: row.author.username.clone(),
            created: recipe.created_date.format(DATE_FORMAT).to_string(),
            description: recipe.description.clone(),
            ingredients: recipe.ingredients.clone(),
            cooking_steps: recipe.cooking_steps.clone(),
            cooking_time: recipe.cooking_time().to_string(),
            active: recipe.active,
        }
    }
}

#[derive(Template)]
#[template(path = "recipe_detail.html")]
pub struct RecipeDetailPage {
    pub layout: Layout,
    pub recipe: RecipeView,
    pub can_edit: bool,
}

/// A `<select>` entry.
#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub id: i32,
    pub name: String,
    pub selected: bool,
}

pub fn category_options(categories: &[category::Model], selected: Option<i32>) -> Vec<CategoryOption> {
    categories
        .iter()
        .map(|c| CategoryOption {
            id: c.id,
            name: c.name.clone(),
            selected: Some(c.id) == selected,
        })
        .collect()
}

/// Values echoed back into the recipe form.
#[derive(Debug, Clone, Default)]
pub struct RecipeFormValues {
    pub title: String,
    pub category_id: Option<i32>,
    pub description: String,
    pub ingredients: String,
    pub cooking_steps: String,
    pub cooking_time: String,
    pub active: bool,
}

#[derive(Template)]
#[template(path = "recipe_form.html")]
pub struct RecipeFormPage {
    pub layout: Layout,
    pub heading: String,
    pub action: String,
    pub values: RecipeFormValues,
    pub categories: Vec<CategoryOption>,
    pub errors: Vec<String>,
    /// Set when editing; the photo may then be left unchanged.
    pub current_image_url: Option<String>,
}

impl RecipeFormPage {
    pub fn new(
        layout: Layout,
        heading: &str,
        action: String,
        values: RecipeFormValues,
        errors: Vec<String>,
        current_image_url: Option<String>,
    ) -> Self {
        let categories = category_options(&layout.categories, values.category_id);
        Self {
            layout,
            heading: heading.to_string(),
            action,
            values,
            categories,
            errors,
            current_image_url,
        }
    }

    pub fn has_current_image(&self) -> bool {
        self.current_image_url.is_some()
    }

    pub fn current_image(&self) -> &str {
        self.current_image_url.as_deref().unwrap_or_default()
    }
}

#[derive(Template)]
#[template(path = "recipe_confirm_delete.html")]
pub struct RecipeDeletePage {
    pub layout: Layout,
    pub recipe_id: i32,
    pub title: String,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage {
    pub layout: Layout,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub layout: Layout,
    pub username: String,
    pub email: String,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub layout: Layout,
    pub username: String,
    pub next: String,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "logout.html")]
pub struct LogoutPage {
    pub layout: Layout,
}

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfilePage {
    pub layout: Layout,
    pub username: String,
    pub email: String,
    pub avatar_url: String,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub layout: Layout,
    pub code: u16,
    pub title: &'static str,
    pub message: &'static str,
}

impl ErrorPage {
    pub fn for_status(status: StatusCode, layout: Layout) -> Self {
        let (title, message) = match status {
            StatusCode::FORBIDDEN => (
                "Access denied",
                "You do not have permission to do that.",
            ),
            StatusCode::NOT_FOUND => (
                "Page not found",
                "The page you are looking for does not exist.",
            ),
            StatusCode::BAD_REQUEST => (
                "Bad request",
                "The submitted data could not be processed.",
            ),
            StatusCode::PAYLOAD_TOO_LARGE => (
                "File too large",
                "The uploaded file exceeds the allowed size.",
            ),
            _ => (
                "Something went wrong",
                "An unexpected error occurred. Please try again later.",
            ),
        };
        Self {
            layout,
            code: status.as_u16(),
            title,
            message,
        }
    }
}
