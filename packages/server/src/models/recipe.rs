use common::CookingTime;
use common::entity::{category, recipe};
use common::lifecycle::RecipeDraft;

use super::form::{MultipartForm, UploadedFile};
use crate::pages::RecipeFormValues;

/// A submitted recipe form, as typed.
pub struct RecipeForm {
    pub values: RecipeFormValues,
    pub image: Option<UploadedFile>,
}

impl RecipeForm {
    pub fn from_multipart(mut form: MultipartForm) -> Self {
        let image = form.take_file("image");
        Self {
            values: RecipeFormValues {
                title: form.text("title").trim().to_string(),
                category_id: form.text("category").trim().parse().ok(),
                description: form.text("description").to_string(),
                ingredients: form.text("ingredients").to_string(),
                cooking_steps: form.text("cooking_steps").to_string(),
                cooking_time: form.text("cooking_time").trim().to_string(),
                active: form.checked("active"),
            },
            image,
        }
    }

    /// Check every field, collecting all messages.
    pub fn validate(&self, categories: &[category::Model]) -> Result<RecipeDraft, Vec<String>> {
        let values = &self.values;
        let mut errors = Vec::new();

        if values.title.is_empty() {
            errors.push("Title is required".to_string());
        } else if values.title.chars().count() > recipe::TITLE_MAX_CHARS {
            errors.push(format!(
                "Title must be at most {} characters",
                recipe::TITLE_MAX_CHARS
            ));
        }

        let category_id = values
            .category_id
            .filter(|id| categories.iter().any(|c| c.id == *id));
        if category_id.is_none() {
            errors.push("Select a valid category".to_string());
        }

        for (value, label) in [
            (&values.description, "Description"),
            (&values.ingredients, "Ingredients"),
            (&values.cooking_steps, "Method"),
        ] {
            if value.trim().is_empty() {
                errors.push(format!("{label} is required"));
            }
        }

        let cooking_time = match values.cooking_time.parse::<CookingTime>() {
            Ok(t) => Some(t),
            Err(e) => {
                errors.push(e.to_string());
                None
            }
        };

        match (category_id, cooking_time) {
            (Some(category_id), Some(cooking_time)) if errors.is_empty() => Ok(RecipeDraft {
                title: values.title.clone(),
                category_id,
                description: values.description.clone(),
                ingredients: values.ingredients.clone(),
                cooking_steps: values.cooking_steps.clone(),
                cooking_time,
                active: values.active,
            }),
            _ => Err(errors),
        }
    }
}

impl RecipeFormValues {
    /// Prefill for editing an existing recipe.
    pub fn from_model(recipe: &recipe::Model) -> Self {
        let secs = recipe.cooking_time().as_secs();
        Self {
            title: recipe.title.clone(),
            category_id: Some(recipe.category_id),
            description: recipe.description.clone(),
            ingredients: recipe.ingredients.clone(),
            cooking_steps: recipe.cooking_steps.clone(),
            cooking_time: format!("{:02}:{:02}", secs / 3600, secs % 3600 / 60),
            active: recipe.active,
        }
    }

    pub fn new_recipe() -> Self {
        Self {
            active: true,
            ..Default::default()
        }
    }
}
