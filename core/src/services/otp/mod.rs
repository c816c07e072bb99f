//! OTP lifecycle engine
//!
//! Generation with per-phone rate limiting and purpose-scoped invalidation,
//! attempt-limited verification, resend with cooldown, and expiry purging.

mod config;
mod generator;
mod phone;
mod service;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use generator::NumericCodeGenerator;
pub use phone::PhoneValidator;
pub use service::OtpService;
