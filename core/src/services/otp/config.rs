//! Configuration for the OTP lifecycle engine

use std::time::Duration;

use otp_shared::OtpConfig;

use crate::domain::entities::DEFAULT_MAX_ATTEMPTS;

/// Configuration for the OTP lifecycle engine
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Minutes a generated code stays valid
    pub validity_minutes: i64,
    /// Trailing window for the generation rate limit
    pub rate_limit_minutes: i64,
    /// Codes allowed per phone within the window
    pub max_per_period: u64,
    /// Digits per code
    pub code_length: usize,
    /// Attempt bound stamped on new records
    pub max_attempts: i32,
    /// Window checked by resend while the latest code is still live
    pub resend_cooldown_minutes: i64,
    /// Bound for every individual store call
    pub store_timeout: Duration,
    /// Country calling code used to canonicalise national numbers
    pub country_code: String,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            validity_minutes: 5,
            rate_limit_minutes: 10,
            max_per_period: 3,
            code_length: 6,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            resend_cooldown_minutes: 1,
            store_timeout: Duration::from_millis(5000),
            country_code: String::from("994"),
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            validity_minutes: config.validity_minutes,
            rate_limit_minutes: config.rate_limit_minutes,
            max_per_period: config.max_per_period,
            code_length: config.code_length,
            max_attempts: config.max_attempts,
            resend_cooldown_minutes: config.resend_cooldown_minutes,
            store_timeout: Duration::from_millis(config.store_timeout_ms),
            country_code: config.country_code.clone(),
        }
    }
}

impl OtpServiceConfig {
    pub fn expires_in_seconds(&self) -> i64 {
        self.validity_minutes * 60
    }
}
