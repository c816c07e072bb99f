//! Background removal of expired OTP records

mod service;

pub use service::{CleanupResult, OtpCleanupConfig, OtpCleanupService};
