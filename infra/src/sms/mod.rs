//! SMS Service Module
//!
//! Dispatcher implementations for the OTP delivery contract and the factory
//! that picks one from configuration.
//!
//! Only the logging dispatcher ships today. It writes every outgoing message
//! as a tracing event instead of handing it to a carrier.

use std::sync::Arc;

use otp_core::services::verification::SmsServiceTrait;
use otp_shared::SmsConfig;

pub mod mock_sms;

pub use mock_sms::MockSmsService;

/// Create an SMS service based on configuration
///
/// Unknown providers fall back to the logging dispatcher with a warning so a
/// misconfigured environment still boots.
pub fn create_sms_service(config: &SmsConfig) -> Arc<dyn SmsServiceTrait> {
    match config.provider.as_str() {
        "mock" => Arc::new(MockSmsService::new(config.sender_name.clone())),
        other => {
            tracing::warn!(
                provider = other,
                "Unknown SMS provider, using mock implementation"
            );
            Arc::new(MockSmsService::new(config.sender_name.clone()))
        }
    }
}
