pub mod otp;

pub use otp::{InMemoryOtpRepository, OtpRepository};
