pub mod category;
pub mod profile;
pub mod recipe;
pub mod user;

/// Case-folded copy of a searchable column.
///
/// Lookups compare against these instead of SQL `LOWER()`, which only folds
/// ASCII on SQLite.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}
