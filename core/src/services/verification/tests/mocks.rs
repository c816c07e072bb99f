//! Mock implementations for testing verification service

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::services::verification::traits::SmsServiceTrait;

/// Records every message instead of sending it
pub struct MockSmsService {
    pub sent_messages: Arc<Mutex<Vec<(String, String)>>>,
    should_fail: AtomicBool,
}

impl MockSmsService {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_messages: Arc::new(Mutex::new(Vec::new())),
            should_fail: AtomicBool::new(should_fail),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.should_fail.store(failing, Ordering::SeqCst);
    }

    pub fn last_message(&self, phone: &str) -> Option<String> {
        self.sent_messages
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == phone)
            .map(|(_, message)| message.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent_messages.lock().unwrap().len()
    }
}

#[async_trait]
impl SmsServiceTrait for MockSmsService {
    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("SMS service error".to_string());
        }
        self.sent_messages
            .lock()
            .unwrap()
            .push((phone.to_string(), message.to_string()));
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

/// Pull the numeric code out of a templated SMS body
pub fn extract_code(message: &str) -> String {
    message
        .split("code is: ")
        .nth(1)
        .map(|rest| rest.chars().take_while(|c| c.is_ascii_digit()).collect())
        .unwrap_or_default()
}
