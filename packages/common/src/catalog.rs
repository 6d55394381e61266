//! Read-side queries over recipes, shared by the web views and the query API.

use std::collections::HashMap;

use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, SelectTwo,
};

use crate::entity::{category, fold, recipe, user};

/// Recipes per listing page.
pub const PAGE_SIZE: u64 = 5;

/// A recipe together with the rows it references.
#[derive(Debug, Clone)]
pub struct RecipeRow {
    pub recipe: recipe::Model,
    pub category: category::Model,
    pub author: user::Model,
}

/// One page of a listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based.
    pub number: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Which recipes a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeScope {
    All,
    Author(i32),
    Category(i32),
}

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Substring pattern against a folded column.
fn contains_ci(fragment: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like(&fold(fragment)))).escape('\\')
}

fn newest_first(select: Select<recipe::Entity>) -> SelectTwo<recipe::Entity, category::Entity> {
    select
        .order_by_desc(recipe::Column::CreatedDate)
        .order_by_desc(recipe::Column::Id)
        .find_also_related(category::Entity)
}

/// Every category, in creation order. Feeds the navigation menu.
pub async fn list_categories<C: ConnectionTrait>(db: &C) -> Result<Vec<category::Model>, DbErr> {
    category::Entity::find()
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
}

pub async fn find_category<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<category::Model>, DbErr> {
    category::Entity::find_by_id(id).one(db).await
}

pub async fn find_user_by_username<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
}

/// A page of recipes, newest first.
///
/// `page` is 1-based. Returns `None` when the page does not exist; page 1
/// of an empty listing is always valid.
pub async fn recipe_page<C: ConnectionTrait>(
    db: &C,
    scope: RecipeScope,
    page: u64,
) -> Result<Option<Page<RecipeRow>>, DbErr> {
    let select = match scope {
        RecipeScope::All => recipe::Entity::find(),
        RecipeScope::Author(id) => recipe::Entity::find().filter(recipe::Column::AuthorId.eq(id)),
        RecipeScope::Category(id) => {
            recipe::Entity::find().filter(recipe::Column::CategoryId.eq(id))
        }
    };

    let total_items = select.clone().count(db).await?;
    let total_pages = total_items.div_ceil(PAGE_SIZE).max(1);
    if page == 0 || page > total_pages {
        return Ok(None);
    }

    let rows = newest_first(select)
        .offset((page - 1) * PAGE_SIZE)
        .limit(PAGE_SIZE)
        .all(db)
        .await?;

    Ok(Some(Page {
        items: attach_authors(db, rows).await?,
        number: page,
        total_items,
        total_pages,
    }))
}

pub async fn find_recipe<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<RecipeRow>, DbErr> {
    let row = recipe::Entity::find_by_id(id)
        .find_also_related(category::Entity)
        .one(db)
        .await?;
    Ok(attach_authors(db, row.into_iter().collect()).await?.pop())
}

/// Newest recipe whose title contains `fragment`, ignoring case.
pub async fn lookup_by_name<C: ConnectionTrait>(
    db: &C,
    fragment: &str,
) -> Result<Option<RecipeRow>, DbErr> {
    let row = newest_first(
        recipe::Entity::find().filter(recipe::Column::TitleFolded.like(contains_ci(fragment))),
    )
    .one(db)
    .await?;
    Ok(attach_authors(db, row.into_iter().collect()).await?.pop())
}

/// Recipes whose ingredient list contains `fragment`, ignoring case.
pub async fn lookup_by_ingredient<C: ConnectionTrait>(
    db: &C,
    fragment: &str,
) -> Result<Vec<RecipeRow>, DbErr> {
    let rows = newest_first(
        recipe::Entity::find()
            .filter(recipe::Column::IngredientsFolded.like(contains_ci(fragment))),
    )
    .all(db)
    .await?;
    attach_authors(db, rows).await
}

/// Recipes in the category named exactly `name`, ignoring case.
pub async fn lookup_by_category<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<Vec<RecipeRow>, DbErr> {
    let rows = newest_first(recipe::Entity::find())
        .filter(category::Column::NameFolded.eq(fold(name)))
        .all(db)
        .await?;
    attach_authors(db, rows).await
}

/// Load the authors of `rows` in one query and zip them in.
///
/// Rows whose category or author vanished in between are dropped.
async fn attach_authors<C: ConnectionTrait>(
    db: &C,
    rows: Vec<(recipe::Model, Option<category::Model>)>,
) -> Result<Vec<RecipeRow>, DbErr> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let mut author_ids: Vec<i32> = rows.iter().map(|(r, _)| r.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let authors: HashMap<i32, user::Model> = user::Entity::find()
        .filter(user::Column::Id.is_in(author_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    Ok(rows
        .into_iter()
        .filter_map(|(recipe, category)| {
            let author = authors.get(&recipe.author_id)?.clone();
            Some(RecipeRow {
                recipe,
                category: category?,
                author,
            })
        })
        .collect())
}
