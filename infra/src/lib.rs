//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the OTP core depends on.
//!
//! - **Database**: MySQL `OtpRepository` over SQLx, connection pool, migrations
//! - **SMS**: message dispatch implementations and the provider factory
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use otp_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// SMS service module
pub mod sms;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Sms(message) => DomainError::DeliveryFailed { message },
            other => DomainError::StoreUnavailable {
                message: other.to_string(),
            },
        }
    }
}
