use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};

use crate::CookingTime;
use crate::media::layout;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    pub category_id: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub ingredients: String,
    #[sea_orm(column_type = "Text")]
    pub cooking_steps: String,
    /// In whole seconds.
    pub cooking_time: i64,
    /// Media path of the resampled dish photo.
    pub image: String,
    pub author_id: i32,
    pub active: bool,

    pub created_date: DateTimeUtc,

    /// Search copies of `title` and `ingredients`, see [`super::fold`].
    #[serde(skip)]
    pub title_folded: String,
    #[serde(skip)]
    #[sea_orm(column_type = "Text")]
    pub ingredients_folded: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if let ActiveValue::Set(title) = &self.title {
            self.title_folded = ActiveValue::Set(super::fold(title));
        }
        if let ActiveValue::Set(ingredients) = &self.ingredients {
            self.ingredients_folded = ActiveValue::Set(super::fold(ingredients));
        }
        Ok(self)
    }
}

/// Longest accepted recipe title.
pub const TITLE_MAX_CHARS: usize = 150;

impl Model {
    pub fn cooking_time(&self) -> CookingTime {
        CookingTime::from_secs(self.cooking_time)
    }

    /// Derived thumbnail location; the file itself is produced on first read.
    pub fn thumbnail_path(&self) -> String {
        layout::thumbnail_path(&self.image)
    }
}
