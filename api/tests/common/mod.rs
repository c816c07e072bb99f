//! Shared harness for the HTTP tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;

use otp_api::{AppState, StoreProbe};
use otp_core::repositories::{InMemoryOtpRepository, OtpRepository};
use otp_core::services::{OtpService, OtpServiceConfig, SmsServiceTrait, VerificationService};

pub const PHONE: &str = "+994501234567";
pub const JSON_LIMIT: usize = 4096;

/// Records every message instead of sending it
#[derive(Default)]
pub struct RecordingSms {
    sent: Mutex<Vec<(String, String)>>,
    failing: AtomicBool,
}

impl RecordingSms {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_recipient(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(to, _)| to.clone())
    }

    /// Code from the most recent message to `phone`
    pub fn last_code(&self, phone: &str) -> String {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == phone)
            .and_then(|(_, body)| body.split("code is: ").nth(1).map(str::to_string))
            .map(|rest| rest.chars().take_while(|c| c.is_ascii_digit()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SmsServiceTrait for RecordingSms {
    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String> {
        if self.failing.load(Ordering::SeqCst) {
            return Err("gateway unavailable".to_string());
        }
        self.sent
            .lock()
            .unwrap()
            .push((phone.to_string(), message.to_string()));
        Ok(format!("test-{}", uuid::Uuid::new_v4()))
    }

    fn provider_name(&self) -> &str {
        "recording"
    }
}

pub struct Harness {
    pub repository: Arc<InMemoryOtpRepository>,
    pub sms: Arc<RecordingSms>,
    pub state: web::Data<AppState<InMemoryOtpRepository, RecordingSms>>,
}

pub fn harness() -> Harness {
    harness_with(OtpServiceConfig::default())
}

pub fn harness_with(config: OtpServiceConfig) -> Harness {
    let repository = Arc::new(InMemoryOtpRepository::new());
    let sms = Arc::new(RecordingSms::default());

    let otp_service = Arc::new(OtpService::new(repository.clone(), config));
    let verification_service = Arc::new(VerificationService::new(otp_service, sms.clone()));

    let probe_repository: Arc<dyn OtpRepository> = repository.clone();
    let state = web::Data::new(AppState::new(
        verification_service,
        StoreProbe::Repository(probe_repository),
        "recording",
    ));

    Harness {
        repository,
        sms,
        state,
    }
}
