use std::any::Any;

use askama::Template;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use common::catalog;
use tracing::{error, warn};

use crate::error::{AppError, RenderErrorPage};
use crate::extractors::page::PageContext;
use crate::extractors::session::SessionUser;
use crate::pages::{AboutPage, ErrorPage, Layout};
use crate::state::AppState;

pub async fn about(ctx: PageContext) -> Result<Response, AppError> {
    ctx.render(|layout| AboutPage { layout })
}

pub async fn error403() -> AppError {
    AppError::PermissionDenied
}

pub async fn error404() -> AppError {
    AppError::NotFound
}

pub async fn error500() -> AppError {
    AppError::Internal("Requested the server error page".into())
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Converts a caught panic into the 500 page.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(detail, "Handler panicked");
    AppError::Internal(format!("panic: {detail}")).into_response()
}

/// Replaces the body of error responses with the full error page, menu and
/// all.
pub async fn render_error_pages(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let headers = request.headers().clone();
    let response = next.run(request).await;

    let Some(RenderErrorPage(status)) = response.extensions().get::<RenderErrorPage>().copied()
    else {
        return response;
    };

    let jar = CookieJar::from_headers(&headers);
    let user = SessionUser::from_jar(&jar, &state.config.auth.session_secret);
    let categories = match catalog::list_categories(&state.db).await {
        Ok(categories) => categories,
        Err(e) => {
            warn!(error = %e, "Error page rendered without category menu");
            vec![]
        }
    };
    let layout = Layout {
        categories,
        username: user.map(|u| u.username),
        flashes: vec![],
    };

    let html = match ErrorPage::for_status(status, layout).render() {
        Ok(html) => html,
        Err(e) => {
            error!(error = %e, "Error page template failed");
            return response;
        }
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(html))
}
