use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn recipe_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::recipes_by_ingredient))
        .routes(routes!(handlers::recipes_by_category))
        .routes(routes!(handlers::recipe_by_name))
}
