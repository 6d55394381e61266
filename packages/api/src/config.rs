use common::config::{DatabaseConfig, base_builder};
use config::ConfigError;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Shares the config file with the web site; the listener lives under
/// `[api]` so the two never fight over `[server]`.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(rename = "api")]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = base_builder()
            .set_default("api.host", "127.0.0.1")?
            .set_default("api.port", 8001)?
            .build()?;

        s.try_deserialize()
    }
}
