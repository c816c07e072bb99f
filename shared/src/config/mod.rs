//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `database` - Store backend selection and connection pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `otp` - Passcode lifecycle tunables (validity, rate limits, attempts)
//! - `server` - HTTP server configuration
//! - `sms` - Message delivery provider configuration

pub mod database;
pub mod environment;
pub mod otp;
pub mod server;
pub mod sms;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use database::{DatabaseConfig, StoreBackend};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;
pub use server::ServerConfig;
pub use sms::SmsConfig;

/// Prefix for layered environment overrides, e.g. `OTP__SERVER__PORT=9090`
const ENV_OVERRIDE_PREFIX: &str = "OTP";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// OTP lifecycle configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// SMS delivery configuration
    #[serde(default)]
    pub sms: SmsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from plain environment variables
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            otp: OtpConfig::from_env(),
            sms: SmsConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Load layered configuration
    ///
    /// Layers, lowest precedence first:
    /// 1. values from [`AppConfig::from_env`]
    /// 2. the optional `config.<environment>.toml` file
    /// 3. `OTP__<SECTION>__<KEY>` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let base = Self::from_env();
        let config_file = base.environment.config_file().to_string();

        let layered = config::Config::builder()
            .add_source(config::Config::try_from(&base)?)
            .add_source(config::File::with_name(&config_file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_OVERRIDE_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = layered.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Reject configuration values the service cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.otp.validate().map_err(ConfigError::Invalid)?;

        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".to_string()));
        }
        if self.database.backend == StoreBackend::Mysql && self.database.url.is_empty() {
            return Err(ConfigError::Invalid(
                "database.url is required for the mysql backend".to_string(),
            ));
        }
        Ok(())
    }
}
