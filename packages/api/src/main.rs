use std::net::SocketAddr;

use common::database;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::config::ApiConfig;
use api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ApiConfig::load()?;
    let db = database::connect(&config.database).await?;

    let app = api::build_router(AppState { db });

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Recipe API running at http://{}", addr);
    info!("Swagger UI at http://{}/docs/", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
