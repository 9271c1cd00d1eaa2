//! Configuration module for annect-server.
//!
//! Handles loading configuration from the TOML file, CLI arguments,
//! and environment variables, and converting it into the runtime
//! sections shared with the core crate.

pub mod file;
pub mod runtime;

use crate::config::file::FileConfig;
use crate::config::runtime::{
    BillingConfig, CronConfig, GatewayConfig, MailConfig, ServerConfig, SharedConfig,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("DATABASE_URL environment variable not set")]
    MissingDatabaseUrl,
}

/// Loaded configuration result containing all sections.
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub billing: BillingConfig,
    pub cron: CronConfig,
    pub gateway: GatewayConfig,
    pub mail: MailConfig,
}

impl LoadedConfig {
    /// Convert into a SharedConfig with Arc<RwLock<T>> wrappers.
    pub fn into_shared(self) -> SharedConfig {
        SharedConfig {
            server: Arc::new(RwLock::new(self.server)),
            billing: Arc::new(RwLock::new(self.billing)),
            cron: Arc::new(RwLock::new(self.cron)),
            gateway: Arc::new(RwLock::new(self.gateway)),
            mail: Arc::new(RwLock::new(self.mail)),
        }
    }
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: std::path::PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// Reads the TOML file, applies CLI overrides, validates, and builds
    /// the runtime sections.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        let mut file_config: FileConfig = toml::from_str(&config_content)?;

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }

        self.validate(&file_config)?;

        Ok(build_loaded_config(file_config))
    }

    /// Reload the configuration (used during SIGHUP).
    pub fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.load()
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        if config.cron.secret.is_empty() {
            return Err(ConfigError::ValidationError(
                "cron.secret must not be empty".to_string(),
            ));
        }
        if config.billing.listing_fee_per_day.is_sign_negative() {
            return Err(ConfigError::ValidationError(
                "billing.listing_fee_per_day must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

fn build_loaded_config(file_config: FileConfig) -> LoadedConfig {
    LoadedConfig {
        server: ServerConfig {
            listen: file_config.server.listen,
        },
        billing: BillingConfig {
            listing_fee_per_day: file_config.billing.listing_fee_per_day,
        },
        cron: CronConfig {
            secret: file_config.cron.secret,
        },
        gateway: GatewayConfig {
            base_url: file_config.gateway.base_url,
            server_key: file_config.gateway.server_key,
        },
        mail: MailConfig {
            base_url: file_config.mail.base_url,
            api_key: file_config.mail.api_key,
            sender: file_config.mail.sender,
        },
    }
}

/// Get the database URL from the environment.
pub fn get_database_url() -> Result<String, ConfigError> {
    std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)
}
