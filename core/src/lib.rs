//! # OTP Core
//!
//! Domain layer of the SMS OTP service: the OTP record, the error taxonomy,
//! the store contract, and the services that implement the passcode
//! lifecycle on top of it.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{OtpPurpose, OtpRecord, OtpStatus};
pub use errors::{DomainError, DomainResult};
pub use repositories::{InMemoryOtpRepository, OtpRepository};
pub use services::{
    OtpCleanupConfig, OtpCleanupService, OtpService, OtpServiceConfig, SmsServiceTrait,
    VerificationService,
};
