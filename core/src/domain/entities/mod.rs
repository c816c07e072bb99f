//! Domain entities representing core business objects.

pub mod otp;

pub use otp::{OtpRecord, OtpStatus, DEFAULT_MAX_ATTEMPTS};
