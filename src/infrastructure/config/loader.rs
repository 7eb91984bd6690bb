use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::{Config, TestOption};

/// Project configuration file, relative to the working directory
pub const CONFIG_FILE: &str = "flankci.yaml";

/// Optional local overrides, relative to the working directory
pub const LOCAL_CONFIG_FILE: &str = "flankci.local.yaml";

/// Prefix of environment variable overrides (`FLANKCI_CI__APP_ID`, ...)
pub const ENV_PREFIX: &str = "FLANKCI_";

/// Environment variable conventionally holding the Bitrise access token
pub const TOKEN_ENV: &str = "BITRISE_TOKEN";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    #[error("Invalid server port: 0")]
    InvalidPort,

    #[error("Invalid CI timeout: 0 seconds")]
    InvalidTimeout,

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must be less than max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    #[error("Option {0} has an empty label")]
    EmptyOptionLabel(usize),

    #[error("Drop-down option '{0}' has no values")]
    EmptyDropDown(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. flankci.yaml (project config)
    /// 3. flankci.local.yaml (local overrides, optional)
    /// 4. Environment variables (FLANKCI_* prefix, `__` separates sections)
    /// 5. BITRISE_TOKEN, mapped onto `ci.token`
    pub fn load() -> Result<Config> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(CONFIG_FILE))
            .merge(Yaml::file(LOCAL_CONFIG_FILE));

        Self::extract(figment).context("Failed to extract configuration from figment")
    }

    /// Load configuration from a specific file, still honouring environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path));

        Self::extract(figment).with_context(|| format!("Failed to load config from {}", path.display()))
    }

    fn extract(figment: Figment) -> Result<Config> {
        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Env::raw().only(&[TOKEN_ENV]).map(|_| "ci.token".into()))
            .extract()?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(
                config.logging.rotation.clone(),
            ));
        }

        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if config.ci.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        let retry = &config.ci.retry;
        if retry.initial_backoff_ms >= retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                retry.initial_backoff_ms,
                retry.max_backoff_ms,
            ));
        }

        for (index, option) in config.test_data.options.iter().enumerate() {
            if option.label().trim().is_empty() {
                return Err(ConfigError::EmptyOptionLabel(index));
            }
            if let TestOption::DropDown { label, values } = option {
                if values.is_empty() {
                    return Err(ConfigError::EmptyDropDown(label.clone()));
                }
            }
        }

        Ok(())
    }
}
