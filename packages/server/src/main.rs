use std::net::SocketAddr;
use std::sync::Arc;

use common::database;
use common::lifecycle::MediaLifecycle;
use common::storage::FilesystemMediaStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;

    let db = database::connect(&config.database).await?;
    database::init_schema(&db).await?;

    let store = FilesystemMediaStore::new(config.media.root.clone()).await?;
    info!(root = %config.media.root.display(), "Media store ready");

    let state = AppState {
        db,
        media: MediaLifecycle::new(Arc::new(store)),
        config: config.clone(),
    };
    let app = server::build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Tasty Food running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
