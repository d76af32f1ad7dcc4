//! Configuration module
//!
//! Settings are read from a TOML file, by default
//! `<config dir>/ecoconnect/config.toml`. Every section and key is optional;
//! a missing file yields the built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::application::listing::{AVAILABILITY_PAGE_SIZE, PROVIDERS_PAGE_SIZE};
use crate::application::DeliveryMode;
use crate::infrastructure::DatabaseConfig;
use crate::shared::errors::InfraError;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "ECOCONNECT_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSection {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseSection {
    pub fn connection_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections.max(1),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; RUST_LOG takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_from_address")]
    pub from_address: String,
    #[serde(default)]
    pub delivery: DeliveryMode,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from_address: default_from_address(),
            delivery: DeliveryMode::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_providers_page_size")]
    pub providers_page_size: u64,
    #[serde(default = "default_availability_page_size")]
    pub availability_page_size: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            providers_page_size: PROVIDERS_PAGE_SIZE,
            availability_page_size: AVAILABILITY_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Uploaded files live under this directory
    #[serde(default = "default_media_root")]
    pub root: PathBuf,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: default_media_root(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

// Default value functions
fn default_database_url() -> String {
    DatabaseConfig::default().url
}

fn default_max_connections() -> u32 {
    DatabaseConfig::default().max_connections
}

fn default_log_level() -> String {
    "info".into()
}

fn default_from_address() -> String {
    "noreply@ecoconnect.local".into()
}

fn default_providers_page_size() -> u64 {
    PROVIDERS_PAGE_SIZE
}

fn default_availability_page_size() -> u64 {
    AVAILABILITY_PAGE_SIZE
}

fn default_media_root() -> PathBuf {
    PathBuf::from("./media")
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl AppConfig {
    /// Load from `path`; a missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, InfraError> {
        toml::from_str(contents).map_err(|e| InfraError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, InfraError> {
        toml::to_string_pretty(self).map_err(|e| InfraError::Config(e.to_string()))
    }
}

/// `$ECOCONNECT_CONFIG` if set, otherwise `<config dir>/ecoconnect/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ecoconnect")
        .join("config.toml")
}
