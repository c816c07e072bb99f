//! Mock SMS Service Implementation
//!
//! Logs SMS messages instead of sending them. The phone number is always
//! masked; the message body is logged only when `log_content` is enabled.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use otp_core::services::verification::SmsServiceTrait;
use otp_shared::mask_phone_number;

/// Mock SMS service for development and testing
#[derive(Clone)]
pub struct MockSmsService {
    /// Sender name attached to every logged message
    sender_name: String,
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
    /// Whether the message body is written to the log
    log_content: bool,
}

impl MockSmsService {
    /// Create a new mock SMS service
    pub fn new(sender_name: impl Into<String>) -> Self {
        Self::with_options(sender_name, true, false)
    }

    /// Create a mock service with configurable options
    pub fn with_options(
        sender_name: impl Into<String>,
        log_content: bool,
        simulate_failure: bool,
    ) -> Self {
        Self {
            sender_name: sender_name.into(),
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: Arc::new(AtomicBool::new(simulate_failure)),
            log_content,
        }
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new("OTPService")
    }
}

#[async_trait]
impl SmsServiceTrait for MockSmsService {
    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String> {
        let masked_phone = mask_phone_number(phone);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                target: "sms_service",
                provider = "mock",
                phone = %masked_phone,
                "Mock SMS service simulating failure"
            );
            return Err("Simulated SMS sending failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.log_content {
            info!(
                target: "sms_service",
                provider = "mock",
                sender = %self.sender_name,
                phone = %masked_phone,
                message_id = %message_id,
                count = count,
                content = message,
                "SMS sent (mock)"
            );
        } else {
            info!(
                target: "sms_service",
                provider = "mock",
                sender = %self.sender_name,
                phone = %masked_phone,
                message_id = %message_id,
                message_length = message.len(),
                "SMS sent (mock)"
            );
        }

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
