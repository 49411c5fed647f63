use crate::harvest::CollectionSource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Repository backend configuration
    #[serde(default)]
    pub state: StateConfig,

    /// Search index configuration
    #[serde(default)]
    pub search: crate::search::SearchConfig,

    /// Default data seeding
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Harvest source declarations
    #[serde(default)]
    pub harvest: HarvestConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

const EMBEDDED_DEFAULTS: &str = include_str!("../config/default.toml");

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(embedded_source())
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: SCHOLARS__)
            .add_source(
                config::Environment::with_prefix("SCHOLARS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// The bundled configuration alone, harvest sources included
    pub fn embedded() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(embedded_source())
            .build()?
            .try_deserialize()
    }
}

fn embedded_source() -> config::File<config::FileSourceString, config::FileFormat> {
    config::File::from_str(EMBEDDED_DEFAULTS, config::FileFormat::Toml)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Externally visible base URL, used for hypermedia links
    #[serde(default = "default_public_url")]
    pub public_url: String,

    /// Page size used when a request does not name one
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Largest page size a client may request
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
            public_url: default_public_url(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateConfig {
    /// Repository backend type
    #[serde(default)]
    pub backend: StateBackend,

    /// Path for the embedded database
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum StateBackend {
    #[default]
    Memory,
    Sled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Overwrite existing defaults with the bundled values on every start
    #[serde(default)]
    pub update_defaults: bool,

    /// Directory the bundled resources are resolved against
    #[serde(default = "default_resource_root")]
    pub resource_root: PathBuf,

    #[serde(default = "default_themes_resource")]
    pub themes: String,

    #[serde(default = "default_directory_views_resource")]
    pub directory_views: String,

    #[serde(default = "default_discovery_views_resource")]
    pub discovery_views: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            update_defaults: false,
            resource_root: default_resource_root(),
            themes: default_themes_resource(),
            directory_views: default_directory_views_resource(),
            discovery_views: default_discovery_views_resource(),
        }
    }
}

/// Harvest sources keyed by entity type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarvestConfig {
    #[serde(default)]
    pub sources: BTreeMap<String, CollectionSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,

    /// Service name
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
            service_name: default_service_name(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    9000
}

fn default_public_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_page_size() -> u32 {
    20
}

fn default_max_page_size() -> u32 {
    1000
}

fn default_resource_root() -> PathBuf {
    PathBuf::from("defaults")
}

fn default_themes_resource() -> String {
    "themes.yml".to_string()
}

fn default_directory_views_resource() -> String {
    "directoryViews.yml".to_string()
}

fn default_discovery_views_resource() -> String {
    "discoveryViews.yml".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "scholars-middleware".to_string()
}
