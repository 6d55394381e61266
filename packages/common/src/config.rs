use std::path::PathBuf;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "TASTYFOOD_CONFIG";

/// Relational store connection settings.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_host")]
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    #[serde(default = "default_db_user")]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_db_name")]
    pub name: String,
    /// Full connection URL. Takes precedence over the individual fields when set.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_host() -> String {
    "127.0.0.1".into()
}
fn default_db_port() -> u16 {
    5432
}
fn default_db_user() -> String {
    "postgres".into()
}
fn default_db_name() -> String {
    "tastyfood".into()
}
fn default_max_connections() -> u32 {
    20
}

impl DatabaseConfig {
    /// Connection URL assembled from the individual parameters unless `url` is set.
    /// Credentials are percent-encoded.
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                utf8_percent_encode(&self.user, NON_ALPHANUMERIC),
                utf8_percent_encode(&self.password, NON_ALPHANUMERIC),
                self.host,
                self.port,
                utf8_percent_encode(&self.name, NON_ALPHANUMERIC),
            ),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            port: default_db_port(),
            user: default_db_user(),
            password: String::new(),
            name: default_db_name(),
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

/// Where uploaded and derived media live.
#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    #[serde(default = "default_media_root")]
    pub root: PathBuf,
    /// Largest accepted upload in bytes. Default: 10 MiB.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
}

fn default_media_root() -> PathBuf {
    PathBuf::from("./media")
}
fn default_max_upload_size() -> usize {
    10 * 1024 * 1024
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: default_media_root(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

/// Config builder with the shared sources every binary reads:
/// `config/config.toml` (or `$TASTYFOOD_CONFIG`) overridden by
/// `TASTYFOOD__SECTION__KEY` environment variables.
pub fn base_builder() -> ConfigBuilder<DefaultState> {
    let config_path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config/config".into());

    Config::builder()
        .add_source(File::with_name(&config_path).required(false))
        .add_source(Environment::with_prefix("TASTYFOOD").separator("__"))
}

/// Settings shared by the admin tooling.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub media: MediaConfig,
}

impl StoreConfig {
    pub fn load() -> Result<Self, ConfigError> {
        base_builder().build()?.try_deserialize()
    }
}
