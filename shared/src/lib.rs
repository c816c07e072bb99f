//! Shared utilities and common types for the SMS OTP service
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types and loading
//! - Utility functions (phone masking for logs)
//! - Health check response types

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, DatabaseConfig, Environment, LogFormat, LoggingConfig, OtpConfig,
    ServerConfig, SmsConfig, StoreBackend,
};
pub use types::{HealthResponse, HealthStatus, ServiceHealth};
pub use utils::{mask_phone_number, phone};
