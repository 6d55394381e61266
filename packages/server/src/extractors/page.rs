use askama::Template;
use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use common::catalog;

use crate::error::AppError;
use crate::extractors::session::SessionUser;
use crate::pages::Layout;
use crate::state::AppState;
use crate::utils::flash;

/// Everything the shared page layout needs: the visitor, queued flash
/// messages and the category menu.
pub struct PageContext {
    pub user: Option<SessionUser>,
    pub layout: Layout,
    jar: CookieJar,
}

impl FromRequestParts<AppState> for PageContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let user = SessionUser::from_jar(&jar, &state.config.auth.session_secret);
        let layout = Layout {
            categories: catalog::list_categories(&state.db).await?,
            username: user.as_ref().map(|u| u.username.clone()),
            flashes: flash::read(&jar),
        };
        Ok(Self { user, layout, jar })
    }
}

impl PageContext {
    /// The request's cookies, flash queue untouched. For handlers that
    /// redirect instead of rendering.
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }

    pub fn with_jar(mut self, update: impl FnOnce(CookieJar) -> CookieJar) -> Self {
        self.jar = update(self.jar);
        self
    }

    /// Build a page around the layout and render it.
    pub fn render<T, F>(self, build: F) -> Result<Response, AppError>
    where
        T: Template,
        F: FnOnce(Layout) -> T,
    {
        self.render_with_status(StatusCode::OK, build)
    }

    /// Like [`render`](Self::render) with an explicit status. Shown flash
    /// messages are dropped from the queue.
    pub fn render_with_status<T, F>(self, status: StatusCode, build: F) -> Result<Response, AppError>
    where
        T: Template,
        F: FnOnce(Layout) -> T,
    {
        let html = build(self.layout)
            .render()
            .map_err(|e| AppError::Internal(format!("Template error: {e}")))?;
        Ok((status, flash::clear(self.jar), Html(html)).into_response())
    }
}
