pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod routes;
pub mod state;
pub mod utils;

use axum::middleware;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    routes::web_routes(&state.config.media)
        .fallback(handlers::pages::not_found)
        .layer(CatchPanicLayer::custom(handlers::pages::handle_panic))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            handlers::pages::render_error_pages,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
