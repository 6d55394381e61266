use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use common::accounts::AccountError;
use sea_orm::DbErr;

use crate::utils::redirect::login_url;

/// Marks a response whose body should be replaced by the full HTML error
/// page. The page itself is rendered by the error-page middleware, which
/// has access to the category menu.
#[derive(Debug, Clone, Copy)]
pub struct RenderErrorPage(pub StatusCode);

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// Anonymous visitor on a page that needs a login. Carries the path to
    /// come back to.
    LoginRequired { next: String },
    PermissionDenied,
    NotFound,
    PayloadTooLarge,
    BadRequest(String),
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::LoginRequired { .. } => StatusCode::SEE_OTHER,
            AppError::PermissionDenied => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::LoginRequired { next } => {
                return Redirect::to(&login_url(&next)).into_response();
            }
            AppError::BadRequest(detail) => {
                tracing::debug!("Bad request: {}", detail);
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
            }
            AppError::PermissionDenied | AppError::NotFound | AppError::PayloadTooLarge => {}
        }

        let mut response = (status, status.canonical_reason().unwrap_or_default()).into_response();
        response.extensions_mut().insert(RenderErrorPage(status));
        response
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        AppError::Internal(err.to_string())
    }
}
