use axum::{
    Router,
    routing::{get, post},
};
use common::config::MediaConfig;

use crate::handlers;
use crate::handlers::upload_body_limit;
use crate::state::AppState;

pub fn web_routes(media: &MediaConfig) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::recipe::home))
        .route("/user/{username}", get(handlers::recipe::user_recipes))
        .route(
            "/recipes/category/{id}/",
            get(handlers::recipe::category_recipes),
        )
        .nest("/recipe", recipe_routes(media))
        .merge(account_routes(media))
        .merge(page_routes())
        .route("/media/{*path}", get(handlers::media::serve_media))
}

fn recipe_routes(media: &MediaConfig) -> Router<AppState> {
    Router::new()
        .route(
            "/new/",
            get(handlers::recipe::new_recipe_form).post(handlers::recipe::create_recipe),
        )
        .route("/{id}/", get(handlers::recipe::recipe_detail))
        .route(
            "/{id}/update/",
            get(handlers::recipe::edit_recipe_form).post(handlers::recipe::update_recipe),
        )
        .route(
            "/{id}/delete/",
            get(handlers::recipe::delete_recipe_confirm).post(handlers::recipe::delete_recipe),
        )
        .layer(upload_body_limit(media.max_upload_size))
}

fn account_routes(media: &MediaConfig) -> Router<AppState> {
    Router::new()
        .route(
            "/register/",
            get(handlers::account::register_form).post(handlers::account::register),
        )
        .route(
            "/login/",
            get(handlers::account::login_form).post(handlers::account::login),
        )
        .route(
            "/logout/",
            get(handlers::account::logout).post(handlers::account::logout),
        )
        .route(
            "/profile/",
            get(handlers::account::profile_page)
                .post(handlers::account::update_profile)
                .layer(upload_body_limit(media.max_upload_size)),
        )
}

fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/about/", get(handlers::pages::about))
        .route("/error403/", get(handlers::pages::error403))
        .route("/error404/", get(handlers::pages::error404))
        .route("/error500/", get(handlers::pages::error500))
}
