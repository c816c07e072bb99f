//! Unit tests for the OTP lifecycle engine

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::OtpStatus;
use crate::domain::value_objects::OtpPurpose;
use crate::errors::DomainError;
use crate::repositories::{InMemoryOtpRepository, OtpRepository};
use crate::services::otp::{OtpService, OtpServiceConfig};

use super::mocks::SlowRepository;

const PHONE: &str = "+994501234567";

fn setup() -> (Arc<InMemoryOtpRepository>, OtpService<InMemoryOtpRepository>) {
    setup_with(OtpServiceConfig::default())
}

fn setup_with(
    config: OtpServiceConfig,
) -> (Arc<InMemoryOtpRepository>, OtpService<InMemoryOtpRepository>) {
    let repository = Arc::new(InMemoryOtpRepository::new());
    let service = OtpService::new(repository.clone(), config);
    (repository, service)
}

/// Move a stored record's expiry into the past
async fn expire(repository: &InMemoryOtpRepository, id: uuid::Uuid) {
    let mut record = repository.find_by_id(id).await.unwrap().unwrap();
    record.expires_at = Utc::now() - Duration::seconds(1);
    repository.update(record).await.unwrap();
}

/// Move a stored record's creation time out of every window
async fn age(repository: &InMemoryOtpRepository, id: uuid::Uuid, minutes: i64) {
    let mut record = repository.find_by_id(id).await.unwrap().unwrap();
    record.created_at = Utc::now() - Duration::minutes(minutes);
    repository.update(record).await.unwrap();
}

#[tokio::test]
async fn test_generate_creates_active_record() {
    let (repository, service) = setup();

    let record = service.generate(PHONE, OtpPurpose::Login).await.unwrap();

    assert_eq!(record.phone_number, PHONE);
    assert_eq!(record.purpose, OtpPurpose::Login);
    assert_eq!(record.code.len(), 6);
    assert!(record.code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(record.max_attempts, 3);
    assert_eq!(record.expires_at - record.created_at, Duration::minutes(5));
    assert_eq!(record.status(), OtpStatus::Active);
    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn test_generate_stores_canonical_phone() {
    let (repository, service) = setup();

    let record = service.generate("0501234567", OtpPurpose::Verification).await.unwrap();

    assert_eq!(record.phone_number, PHONE);
    assert_eq!(repository.records_for(PHONE).await.len(), 1);
}

#[tokio::test]
async fn test_generate_rejects_invalid_phone_without_store_access() {
    let (repository, service) = setup();
    repository.set_unavailable(true);

    let result = service.generate("12345", OtpPurpose::Login).await;

    assert_eq!(result.unwrap_err(), DomainError::InvalidPhoneNumber);
}

#[tokio::test]
async fn test_generate_invalidates_previous_codes_for_same_purpose() {
    let (repository, service) = setup();

    let first = service.generate(PHONE, OtpPurpose::Login).await.unwrap();
    let other_purpose = service.generate(PHONE, OtpPurpose::Reset).await.unwrap();
    let second = service.generate(PHONE, OtpPurpose::Login).await.unwrap();

    let first = repository.find_by_id(first.id).await.unwrap().unwrap();
    assert_eq!(first.attempts, first.max_attempts);
    assert_eq!(first.status(), OtpStatus::AttemptsExhausted);

    let other_purpose = repository.find_by_id(other_purpose.id).await.unwrap().unwrap();
    assert_eq!(other_purpose.attempts, 0);

    let active = repository.find_active_by_phone(PHONE).await.unwrap();
    assert_eq!(active.len(), 2);
    assert!(active.iter().any(|r| r.id == second.id));
}

#[tokio::test]
async fn test_old_code_cannot_be_verified_after_regenerate() {
    let (_, service) = setup();

    let first = service.generate(PHONE, OtpPurpose::Login).await.unwrap();
    let second = service.generate(PHONE, OtpPurpose::Login).await.unwrap();

    if first.code != second.code {
        let result = service.verify(PHONE, &first.code, OtpPurpose::Login).await;
        assert_eq!(result.unwrap_err(), DomainError::InvalidOtpCode);
    }
    assert!(service.verify(PHONE, &second.code, OtpPurpose::Login).await.is_ok());
}

#[tokio::test]
async fn test_rate_limit_boundary() {
    let (_, service) = setup();

    for _ in 0..3 {
        assert!(service.generate(PHONE, OtpPurpose::Login).await.is_ok());
    }

    let result = service.generate(PHONE, OtpPurpose::Login).await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::RateLimitExceeded { window_minutes: 10 }
    );
}

#[tokio::test]
async fn test_rate_limit_counts_all_purposes() {
    let (_, service) = setup();

    service.generate(PHONE, OtpPurpose::Login).await.unwrap();
    service.generate(PHONE, OtpPurpose::Reset).await.unwrap();
    service.generate(PHONE, OtpPurpose::Verification).await.unwrap();

    let result = service.generate(PHONE, OtpPurpose::Reset).await;
    assert!(matches!(result, Err(DomainError::RateLimitExceeded { .. })));
}

#[tokio::test]
async fn test_rate_limit_window_slides() {
    let (repository, service) = setup();

    for _ in 0..3 {
        let record = service.generate(PHONE, OtpPurpose::Login).await.unwrap();
        age(&repository, record.id, 11).await;
    }

    assert!(service.generate(PHONE, OtpPurpose::Login).await.is_ok());
}

#[tokio::test]
async fn test_verify_success_then_already_used() {
    let (repository, service) = setup();
    let record = service.generate(PHONE, OtpPurpose::Login).await.unwrap();

    let verified = service.verify(PHONE, &record.code, OtpPurpose::Login).await.unwrap();
    assert!(verified.verified);
    assert!(verified.verified_at.is_some());
    assert_eq!(verified.attempts, 1);

    let again = service.verify(PHONE, &record.code, OtpPurpose::Login).await;
    assert_eq!(again.unwrap_err(), DomainError::OtpAlreadyUsed);

    let stored = repository.find_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(stored.verified_at, verified.verified_at);
    assert_eq!(stored.attempts, 1);
}

#[tokio::test]
async fn test_verify_wrong_code_persists_attempt() {
    let (repository, service) = setup();
    let record = service.generate(PHONE, OtpPurpose::Login).await.unwrap();
    let wrong = if record.code == "000000" { "111111" } else { "000000" };

    let result = service.verify(PHONE, wrong, OtpPurpose::Login).await;
    assert_eq!(result.unwrap_err(), DomainError::InvalidOtpCode);

    let stored = repository.find_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(stored.attempts, 1);
    assert!(!stored.verified);
}

#[tokio::test]
async fn test_verify_exhaustion_blocks_correct_code() {
    let (repository, service) = setup();
    let record = service.generate(PHONE, OtpPurpose::Login).await.unwrap();
    let wrong = if record.code == "000000" { "111111" } else { "000000" };

    for _ in 0..3 {
        let result = service.verify(PHONE, wrong, OtpPurpose::Login).await;
        assert_eq!(result.unwrap_err(), DomainError::InvalidOtpCode);
    }

    let result = service.verify(PHONE, &record.code, OtpPurpose::Login).await;
    assert_eq!(result.unwrap_err(), DomainError::MaxAttemptsReached);

    let stored = repository.find_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(stored.attempts, 3);
    assert!(!stored.verified);
}

#[tokio::test]
async fn test_verify_expired_keeps_attempts() {
    let (repository, service) = setup();
    let record = service.generate(PHONE, OtpPurpose::Login).await.unwrap();
    expire(&repository, record.id).await;

    let result = service.verify(PHONE, &record.code, OtpPurpose::Login).await;
    assert_eq!(result.unwrap_err(), DomainError::OtpExpired);

    let stored = repository.find_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(stored.attempts, 0);
}

#[tokio::test]
async fn test_verify_not_found() {
    let (_, service) = setup();

    let result = service.verify(PHONE, "123456", OtpPurpose::Login).await;
    assert_eq!(result.unwrap_err(), DomainError::OtpNotFound);
}

#[tokio::test]
async fn test_verify_is_purpose_scoped() {
    let (_, service) = setup();
    let record = service.generate(PHONE, OtpPurpose::Login).await.unwrap();

    let result = service.verify(PHONE, &record.code, OtpPurpose::Reset).await;
    assert_eq!(result.unwrap_err(), DomainError::OtpNotFound);
}

#[tokio::test]
async fn test_resend_within_cooldown_rejected() {
    let (_, service) = setup();
    service.generate(PHONE, OtpPurpose::Login).await.unwrap();

    let result = service.resend(PHONE, OtpPurpose::Login).await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::RateLimitExceeded { window_minutes: 1 }
    );
}

#[tokio::test]
async fn test_resend_after_expiry_creates_new_record() {
    let (repository, service) = setup();
    let first = service.generate(PHONE, OtpPurpose::Login).await.unwrap();
    expire(&repository, first.id).await;

    let second = service.resend(PHONE, OtpPurpose::Login).await.unwrap();

    assert_ne!(second.id, first.id);
    assert_eq!(repository.len().await, 2);
}

#[tokio::test]
async fn test_resend_after_cooldown_invalidates_previous() {
    let (repository, service) = setup();
    let first = service.generate(PHONE, OtpPurpose::Login).await.unwrap();
    age(&repository, first.id, 2).await;

    let second = service.resend(PHONE, OtpPurpose::Login).await.unwrap();

    let first = repository.find_by_id(first.id).await.unwrap().unwrap();
    assert_eq!(first.status(), OtpStatus::AttemptsExhausted);
    assert_eq!(second.status(), OtpStatus::Active);
}

#[tokio::test]
async fn test_resend_without_existing_record_generates() {
    let (_, service) = setup();

    let record = service.resend(PHONE, OtpPurpose::Reset).await.unwrap();
    assert_eq!(record.purpose, OtpPurpose::Reset);
}

#[tokio::test]
async fn test_resend_still_subject_to_rate_limit() {
    let (repository, service) = setup();
    for _ in 0..3 {
        let record = service.generate(PHONE, OtpPurpose::Login).await.unwrap();
        expire(&repository, record.id).await;
    }

    let result = service.resend(PHONE, OtpPurpose::Login).await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::RateLimitExceeded { window_minutes: 10 }
    );
}

#[tokio::test]
async fn test_find_and_delete_by_id() {
    let (_, service) = setup();
    let record = service.generate(PHONE, OtpPurpose::Login).await.unwrap();

    assert_eq!(service.find_by_id(record.id).await.unwrap().id, record.id);
    assert!(service.delete(record.id).await.is_ok());
    assert_eq!(service.delete(record.id).await.unwrap_err(), DomainError::OtpNotFound);
    assert_eq!(service.find_by_id(record.id).await.unwrap_err(), DomainError::OtpNotFound);
}

#[tokio::test]
async fn test_purge_expired() {
    let (repository, service) = setup();
    let stale = service.generate(PHONE, OtpPurpose::Login).await.unwrap();
    service.generate(PHONE, OtpPurpose::Reset).await.unwrap();
    expire(&repository, stale.id).await;

    assert_eq!(service.purge_expired().await.unwrap(), 1);
    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn test_store_failure_surfaces_as_unavailable() {
    let (repository, service) = setup();
    repository.set_unavailable(true);

    let result = service.generate(PHONE, OtpPurpose::Login).await;
    assert!(matches!(result, Err(DomainError::StoreUnavailable { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_store_call_timeout() {
    let repository = Arc::new(SlowRepository::new(std::time::Duration::from_secs(10)));
    let config = OtpServiceConfig {
        store_timeout: std::time::Duration::from_millis(100),
        ..Default::default()
    };
    let service = OtpService::new(repository, config);

    let result = service.generate(PHONE, OtpPurpose::Login).await;
    match result {
        Err(DomainError::StoreUnavailable { message }) => {
            assert!(message.contains("count_recent"));
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_custom_code_length_and_attempts() {
    let (_, service) = setup_with(OtpServiceConfig {
        code_length: 8,
        max_attempts: 5,
        ..Default::default()
    });

    let record = service.generate(PHONE, OtpPurpose::Login).await.unwrap();
    assert_eq!(record.code.len(), 8);
    assert_eq!(record.max_attempts, 5);
}
