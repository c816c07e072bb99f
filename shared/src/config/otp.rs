//! OTP lifecycle configuration module

use serde::{Deserialize, Serialize};

/// Widest code the `otp_codes.code` column can hold
pub const MAX_CODE_LENGTH: usize = 10;

/// Tunables for passcode generation, verification and cleanup
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minutes a generated code stays valid
    #[serde(default = "default_validity_minutes")]
    pub validity_minutes: i64,

    /// Trailing window (minutes) used for the per-phone generation limit
    #[serde(default = "default_rate_limit_minutes")]
    pub rate_limit_minutes: i64,

    /// Maximum codes generated per phone within the rate-limit window
    #[serde(default = "default_max_per_period")]
    pub max_per_period: u64,

    /// Number of digits in a generated code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Verification attempts allowed per code
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i32,

    /// Minimum minutes between a resend and the previous unexpired code
    #[serde(default = "default_resend_cooldown_minutes")]
    pub resend_cooldown_minutes: i64,

    /// Seconds between expired-record sweeps
    #[serde(default = "default_cleanup_interval_seconds")]
    pub cleanup_interval_seconds: u64,

    /// Upper bound for a single store call in milliseconds
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,

    /// Country calling code used to canonicalise national numbers
    #[serde(default = "default_country_code")]
    pub country_code: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            validity_minutes: default_validity_minutes(),
            rate_limit_minutes: default_rate_limit_minutes(),
            max_per_period: default_max_per_period(),
            code_length: default_code_length(),
            max_attempts: default_max_attempts(),
            resend_cooldown_minutes: default_resend_cooldown_minutes(),
            cleanup_interval_seconds: default_cleanup_interval_seconds(),
            store_timeout_ms: default_store_timeout_ms(),
            country_code: default_country_code(),
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        fn var<T: std::str::FromStr>(key: &str, default: T) -> T {
            std::env::var(key)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }

        let defaults = Self::default();
        Self {
            validity_minutes: var("OTP_VALIDITY_MINUTES", defaults.validity_minutes),
            rate_limit_minutes: var("OTP_RATE_LIMIT_MINUTES", defaults.rate_limit_minutes),
            max_per_period: var("OTP_MAX_PER_PERIOD", defaults.max_per_period),
            code_length: var("OTP_CODE_LENGTH", defaults.code_length),
            max_attempts: var("OTP_MAX_ATTEMPTS", defaults.max_attempts),
            resend_cooldown_minutes: var(
                "OTP_RESEND_COOLDOWN_MINUTES",
                defaults.resend_cooldown_minutes,
            ),
            cleanup_interval_seconds: var(
                "OTP_CLEANUP_INTERVAL_SECONDS",
                defaults.cleanup_interval_seconds,
            ),
            store_timeout_ms: var("OTP_STORE_TIMEOUT_MS", defaults.store_timeout_ms),
            country_code: var("OTP_COUNTRY_CODE", defaults.country_code),
        }
    }

    /// Seconds a freshly generated code stays valid
    pub fn expires_in_seconds(&self) -> i64 {
        self.validity_minutes * 60
    }

    /// Check the values are usable
    pub fn validate(&self) -> Result<(), String> {
        if self.code_length == 0 {
            return Err("otp.code_length must be at least 1".to_string());
        }
        if self.code_length > MAX_CODE_LENGTH {
            return Err(format!("otp.code_length must be at most {}", MAX_CODE_LENGTH));
        }
        if self.max_attempts < 1 {
            return Err("otp.max_attempts must be at least 1".to_string());
        }
        if self.validity_minutes < 1 {
            return Err("otp.validity_minutes must be at least 1".to_string());
        }
        if self.rate_limit_minutes < 1 {
            return Err("otp.rate_limit_minutes must be at least 1".to_string());
        }
        if self.max_per_period == 0 {
            return Err("otp.max_per_period must be at least 1".to_string());
        }
        if self.store_timeout_ms == 0 {
            return Err("otp.store_timeout_ms must be non-zero".to_string());
        }
        if self.country_code.is_empty() || !self.country_code.chars().all(|c| c.is_ascii_digit()) {
            return Err("otp.country_code must be digits without '+'".to_string());
        }
        Ok(())
    }
}

fn default_validity_minutes() -> i64 {
    5
}

fn default_rate_limit_minutes() -> i64 {
    10
}

fn default_max_per_period() -> u64 {
    3
}

fn default_code_length() -> usize {
    6
}

fn default_max_attempts() -> i32 {
    3
}

fn default_resend_cooldown_minutes() -> i64 {
    1
}

fn default_cleanup_interval_seconds() -> u64 {
    3600 // Sweep hourly
}

fn default_store_timeout_ms() -> u64 {
    5000
}

fn default_country_code() -> String {
    String::from("994")
}
