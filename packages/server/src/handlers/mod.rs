pub mod account;
pub mod media;
pub mod pages;
pub mod recipe;

use axum::extract::DefaultBodyLimit;
use common::MediaOutcome;
use common::entity::user;
use sea_orm::EntityTrait;
use serde::Deserialize;
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

pub(crate) const INVALID_IMAGE: &str =
    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";

/// Room for one uploaded image plus the text fields around it.
pub fn upload_body_limit(max_upload_size: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_upload_size + 64 * 1024)
}

/// The signed-in user's row. A session outliving its user counts as
/// logged out, sending the visitor to log in and come back to `next`.
pub(crate) async fn load_account(
    state: &AppState,
    user_id: i32,
    next: &str,
) -> Result<user::Model, AppError> {
    user::Entity::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::LoginRequired {
            next: next.to_string(),
        })
}

/// Path ids that are not integers name no page.
pub(crate) fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}

/// `?page=N` on listings.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// 1-based page number. Anything but a positive integer is a 404.
    pub fn number(&self) -> Result<u64, AppError> {
        match self.page.as_deref() {
            None | Some("") => Ok(1),
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or(AppError::NotFound),
        }
    }
}

/// Media warnings are already logged one by one; note which operation
/// they belong to.
pub(crate) fn report(outcome: MediaOutcome, operation: &str) {
    if !outcome.is_clean() {
        warn!(
            operation,
            warnings = outcome.warnings().len(),
            "Saved with media warnings"
        );
    }
}
