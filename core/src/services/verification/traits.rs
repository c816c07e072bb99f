//! Delivery dispatcher contract

use async_trait::async_trait;

/// Trait for SMS service integration
#[async_trait]
pub trait SmsServiceTrait: Send + Sync {
    /// Send `message` to `phone`, returning a provider message id
    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String>;

    /// Provider name for logs and health output
    fn provider_name(&self) -> &str;
}
