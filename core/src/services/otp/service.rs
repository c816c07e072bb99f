//! OTP lifecycle engine implementation

use chrono::Duration;
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

use otp_shared::mask_phone_number;

use crate::domain::entities::OtpRecord;
use crate::domain::value_objects::OtpPurpose;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::OtpRepository;

use super::config::OtpServiceConfig;
use super::generator::NumericCodeGenerator;
use super::phone::PhoneValidator;

/// Stateless engine over an [`OtpRepository`]
///
/// All state lives in the store; concurrent calls for the same phone and
/// purpose are not serialised against each other.
pub struct OtpService<R: OtpRepository + ?Sized> {
    repository: Arc<R>,
    generator: NumericCodeGenerator,
    phone_validator: PhoneValidator,
    config: OtpServiceConfig,
}

impl<R: OtpRepository + ?Sized> OtpService<R> {
    pub fn new(repository: Arc<R>, config: OtpServiceConfig) -> Self {
        Self {
            repository,
            generator: NumericCodeGenerator::new(config.code_length),
            phone_validator: PhoneValidator::new(config.country_code.clone()),
            config,
        }
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    pub fn phone_validator(&self) -> &PhoneValidator {
        &self.phone_validator
    }

    /// Issue a new code for `phone_number` and `purpose`
    ///
    /// 1. Validates the phone number
    /// 2. Rejects when the trailing rate-limit window is full
    /// 3. Invalidates every valid record for the same pair
    /// 4. Stores a fresh record
    pub async fn generate(&self, phone_number: &str, purpose: OtpPurpose) -> DomainResult<OtpRecord> {
        if !self.phone_validator.validate(phone_number) {
            return Err(DomainError::InvalidPhoneNumber);
        }
        let phone = self.phone_validator.normalize(phone_number);
        let masked = mask_phone_number(&phone);

        let recent = self
            .bounded(
                "count_recent",
                self.repository.count_recent(&phone, self.config.rate_limit_minutes),
            )
            .await?;
        if recent >= self.config.max_per_period {
            tracing::warn!(
                phone = %masked,
                purpose = %purpose,
                recent = recent,
                event = "rate_limit_exceeded",
                "OTP generation rate limit exceeded"
            );
            return Err(DomainError::RateLimitExceeded {
                window_minutes: self.config.rate_limit_minutes,
            });
        }

        let invalidated = self
            .bounded(
                "invalidate_active",
                self.repository.invalidate_active(&phone, purpose),
            )
            .await?;
        if invalidated > 0 {
            tracing::debug!(
                phone = %masked,
                purpose = %purpose,
                invalidated = invalidated,
                "Invalidated previous OTP codes"
            );
        }

        let record = OtpRecord::new(
            phone,
            self.generator.generate(),
            purpose,
            Duration::minutes(self.config.validity_minutes),
            self.config.max_attempts,
        );
        let record = self.bounded("create", self.repository.create(record)).await?;

        tracing::info!(
            phone = %masked,
            purpose = %purpose,
            otp_id = %record.id,
            event = "otp_generated",
            "Generated new OTP"
        );

        Ok(record)
    }

    /// Verify `code` against the latest record for the pair
    ///
    /// The record is persisted on every outcome except `OtpNotFound`, so a
    /// consumed attempt sticks even when the code is wrong.
    pub async fn verify(
        &self,
        phone_number: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> DomainResult<OtpRecord> {
        let phone = self.phone_validator.normalize(phone_number);
        let masked = mask_phone_number(&phone);

        let mut record = self
            .bounded("find_latest", self.repository.find_latest(&phone, purpose))
            .await?
            .ok_or(DomainError::OtpNotFound)?;

        let outcome = record.verify(code);
        let record = self.bounded("update", self.repository.update(record)).await?;

        match outcome {
            Ok(()) => {
                tracing::info!(
                    phone = %masked,
                    purpose = %purpose,
                    otp_id = %record.id,
                    event = "otp_verified",
                    "OTP verified"
                );
                Ok(record)
            }
            Err(e) => {
                tracing::warn!(
                    phone = %masked,
                    purpose = %purpose,
                    otp_id = %record.id,
                    attempts = record.attempts,
                    error = %e,
                    event = "otp_verification_failed",
                    "OTP verification failed"
                );
                Err(e)
            }
        }
    }

    /// Issue a replacement code, refusing while the latest code is live and
    /// another was created within the cooldown window
    pub async fn resend(&self, phone_number: &str, purpose: OtpPurpose) -> DomainResult<OtpRecord> {
        if !self.phone_validator.validate(phone_number) {
            return Err(DomainError::InvalidPhoneNumber);
        }
        let phone = self.phone_validator.normalize(phone_number);

        let latest = self
            .bounded("find_latest", self.repository.find_latest(&phone, purpose))
            .await?;

        if let Some(existing) = latest.filter(|r| !r.is_expired()) {
            let recent = self
                .bounded(
                    "count_recent",
                    self.repository
                        .count_recent(&phone, self.config.resend_cooldown_minutes),
                )
                .await?;
            if recent > 0 {
                tracing::warn!(
                    phone = %mask_phone_number(&phone),
                    purpose = %purpose,
                    otp_id = %existing.id,
                    event = "resend_cooldown",
                    "OTP resend requested within cooldown"
                );
                return Err(DomainError::RateLimitExceeded {
                    window_minutes: self.config.resend_cooldown_minutes,
                });
            }
        }

        self.generate(&phone, purpose).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> DomainResult<OtpRecord> {
        self.bounded("find_by_id", self.repository.find_by_id(id))
            .await?
            .ok_or(DomainError::OtpNotFound)
    }

    /// Administrative delete
    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if self.bounded("delete", self.repository.delete(id)).await? {
            tracing::info!(otp_id = %id, event = "otp_deleted", "Deleted OTP record");
            Ok(())
        } else {
            Err(DomainError::OtpNotFound)
        }
    }

    /// Remove every expired record, returning how many were deleted
    pub async fn purge_expired(&self) -> DomainResult<u64> {
        self.bounded("delete_expired", self.repository.delete_expired())
            .await
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> DomainResult<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    operation = operation,
                    timeout_ms = self.config.store_timeout.as_millis() as u64,
                    "Store call timed out"
                );
                Err(DomainError::store(format!(
                    "{} timed out after {}ms",
                    operation,
                    self.config.store_timeout.as_millis()
                )))
            }
        }
    }
}
