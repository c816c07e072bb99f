//! SMS delivery configuration module

use serde::{Deserialize, Serialize};

/// SMS provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Provider name ("mock" logs messages instead of transmitting them)
    pub provider: String,

    /// Sender name shown to the recipient
    pub sender_name: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            sender_name: String::from("OTPService"),
        }
    }
}

impl SmsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("SMS_PROVIDER").unwrap_or(defaults.provider),
            sender_name: std::env::var("SMS_SENDER_NAME").unwrap_or(defaults.sender_name),
        }
    }
}
