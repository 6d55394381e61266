use std::sync::Arc;

use anyhow::{Context, bail};
use common::MediaOutcome;
use common::accounts;
use common::catalog;
use common::config::StoreConfig;
use common::database;
use common::entity::{category, recipe};
use common::lifecycle::{self, MediaLifecycle};
use common::storage::FilesystemMediaStore;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
};
use tracing::info;

/// Database and media store, opened once per command.
pub struct Admin {
    db: DatabaseConnection,
    media: MediaLifecycle,
}

impl Admin {
    pub async fn connect(config: &StoreConfig) -> anyhow::Result<Self> {
        let db = database::connect(&config.database)
            .await
            .context("Failed to connect to the database")?;
        let store = FilesystemMediaStore::new(config.media.root.clone())
            .await
            .context("Failed to open the media store")?;
        Ok(Self::new(db, MediaLifecycle::new(Arc::new(store))))
    }

    pub fn new(db: DatabaseConnection, media: MediaLifecycle) -> Self {
        Self { db, media }
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        database::init_schema(&self.db).await?;
        println!("Schema is up to date");
        Ok(())
    }

    pub async fn add_category(&self, name: &str) -> anyhow::Result<()> {
        let model = self.create_category(name).await?;
        println!("Added category {} ({})", model.id, model.name);
        Ok(())
    }

    async fn create_category(&self, name: &str) -> anyhow::Result<category::Model> {
        let name = name.trim();
        if name.is_empty() {
            bail!("Category name must not be empty");
        }
        if name.chars().count() > category::NAME_MAX_CHARS {
            bail!(
                "Category name must be at most {} characters",
                category::NAME_MAX_CHARS
            );
        }

        let model = category::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        info!(category_id = model.id, "Category added");
        Ok(model)
    }

    pub async fn list_categories(&self) -> anyhow::Result<()> {
        let categories = catalog::list_categories(&self.db).await?;
        if categories.is_empty() {
            println!("No categories");
        }
        for c in categories {
            println!("{:>4}  {}", c.id, c.name);
        }
        Ok(())
    }

    pub async fn delete_category(&self, id: i32) -> anyhow::Result<()> {
        let outcome = self.remove_category(id).await?;
        print_warnings(&outcome);
        println!("Deleted category {id}");
        Ok(())
    }

    /// Recipes go through the media lifecycle first so their photos are
    /// removed; the row cascade alone would orphan them.
    async fn remove_category(&self, id: i32) -> anyhow::Result<MediaOutcome> {
        let Some(category) = catalog::find_category(&self.db, id).await? else {
            bail!("No category with id {id}");
        };

        let mut outcome = MediaOutcome::default();
        let recipes = recipe::Entity::find()
            .filter(recipe::Column::CategoryId.eq(id))
            .all(&self.db)
            .await?;
        for recipe in recipes {
            outcome.merge(lifecycle::delete_recipe(&self.db, &self.media, recipe).await?);
        }

        category.delete(&self.db).await?;
        info!(category_id = id, "Category deleted");
        Ok(outcome)
    }

    pub async fn delete_user(&self, username: &str) -> anyhow::Result<()> {
        let Some(user) = catalog::find_user_by_username(&self.db, username).await? else {
            bail!("No user named {username}");
        };
        let outcome = accounts::delete_user(&self.db, &self.media, user).await?;
        print_warnings(&outcome);
        println!("Deleted user {username}");
        Ok(())
    }
}

fn print_warnings(outcome: &MediaOutcome) {
    for warning in outcome.warnings() {
        eprintln!("warning: could not clean up {warning}");
    }
}
