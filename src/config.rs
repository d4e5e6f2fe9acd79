//! Configuration management for `routecast`
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::RoutecastError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `routecast`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutecastConfig {
    /// Search backend configuration
    #[serde(default)]
    pub backend: BackendConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Search backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the search backend
    #[serde(default = "default_backend_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_backend_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    #[serde(default = "default_backend_max_retries")]
    pub max_retries: u32,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_backend_base_url() -> String {
    // Development default for the search backend
    "http://localhost:5000".to_string()
}

fn default_backend_timeout() -> u32 {
    30
}

fn default_backend_max_retries() -> u32 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_base_url(),
            timeout_seconds: default_backend_timeout(),
            max_retries: default_backend_max_retries(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for RoutecastConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl RoutecastConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with ROUTECAST_ prefix,
        // e.g. ROUTECAST_BACKEND__BASE_URL
        builder = builder.add_source(
            Environment::with_prefix("ROUTECAST")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: RoutecastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("routecast").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(RoutecastError::config(
                "Backend base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.backend.timeout_seconds == 0 || self.backend.timeout_seconds > 300 {
            return Err(RoutecastError::config(
                "Backend timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.backend.max_retries > 10 {
            return Err(RoutecastError::config("Backend max retries cannot exceed 10").into());
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(RoutecastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(RoutecastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
