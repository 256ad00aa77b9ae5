//! Configuration settings for postlist

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use super::defaults;
use crate::error::{Error, Result};

/// Application configuration.
///
/// All database settings map onto the connection options of the
/// `posts` store; `page_size` controls how many posts each page
/// shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// MySQL host
    #[serde(default = "default_host")]
    pub host: String,

    /// MySQL port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database name
    #[serde(default = "default_database")]
    pub database: String,

    /// Database user
    #[serde(default = "default_user")]
    pub user: String,

    /// Database password (empty allowed)
    #[serde(default)]
    pub password: String,

    /// Connection charset, applied via `SET NAMES` on connect
    #[serde(default = "default_charset")]
    pub charset: String,

    /// Posts shown per page
    #[serde(default = "default_page_size")]
    pub page_size: u64,

    /// HTTP listen address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Force case-insensitive search matching.
    ///
    /// When `false` (the default), `LIKE` case-sensitivity is left to
    /// the store's column collation. When `true`, both sides of the
    /// comparison are wrapped in `LOWER()` so matching is
    /// case-insensitive regardless of collation.
    #[serde(default)]
    pub case_insensitive_search: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

// Default value functions for serde
fn default_host() -> String {
    defaults::HOST.to_string()
}
fn default_port() -> u16 {
    defaults::PORT
}
fn default_database() -> String {
    defaults::DATABASE.to_string()
}
fn default_user() -> String {
    defaults::USER.to_string()
}
fn default_charset() -> String {
    defaults::CHARSET.to_string()
}
fn default_page_size() -> u64 {
    defaults::PAGE_SIZE
}
fn default_bind_addr() -> String {
    defaults::BIND_ADDR.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: default_database(),
            user: default_user(),
            password: String::new(),
            charset: default_charset(),
            page_size: default_page_size(),
            bind_addr: default_bind_addr(),
            case_insensitive_search: false,
            log_level: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from config file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            // Try default locations
            builder = builder.add_source(File::with_name("postlist").required(false));
        }

        // Override with environment variables (POSTLIST_*)
        builder = builder.add_source(Environment::with_prefix("POSTLIST"));

        let config: AppConfig = builder
            .build()
            .map_err(|e| Error::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(Error::Config("host must not be empty".into()));
        }

        if self.database.is_empty() {
            return Err(Error::Config("database must not be empty".into()));
        }

        if self.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".into()));
        }

        // The charset lands in a SET NAMES statement, so it must stay
        // a bare identifier.
        if self.charset.is_empty()
            || !self
                .charset
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(Error::Config(format!(
                "charset must be a MySQL charset name, got {:?}",
                self.charset
            )));
        }

        if self.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(Error::Config(format!(
                "bind_addr is not a valid socket address: {:?}",
                self.bind_addr
            )));
        }

        Ok(())
    }
}
