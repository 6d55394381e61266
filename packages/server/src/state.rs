use common::lifecycle::MediaLifecycle;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub media: MediaLifecycle,
    pub config: AppConfig,
}
