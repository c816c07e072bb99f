//! Main verification service implementation

use std::sync::Arc;
use uuid::Uuid;

use otp_shared::mask_phone_number;

use crate::domain::entities::OtpRecord;
use crate::domain::value_objects::OtpPurpose;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::OtpRepository;
use crate::services::otp::OtpService;

use super::traits::SmsServiceTrait;
use super::types::{
    failure_message, sms_message, OtpStatusResult, ResendOtpResult, SendOtpResult,
    VerifyOtpResult,
};

/// Use-case layer between the transport and the lifecycle engine
pub struct VerificationService<R, S>
where
    R: OtpRepository + ?Sized,
    S: SmsServiceTrait + ?Sized,
{
    otp_service: Arc<OtpService<R>>,
    sms_service: Arc<S>,
}

impl<R, S> VerificationService<R, S>
where
    R: OtpRepository + ?Sized,
    S: SmsServiceTrait + ?Sized,
{
    pub fn new(otp_service: Arc<OtpService<R>>, sms_service: Arc<S>) -> Self {
        Self {
            otp_service,
            sms_service,
        }
    }

    pub fn otp_service(&self) -> &Arc<OtpService<R>> {
        &self.otp_service
    }

    /// Seconds a freshly issued code stays valid
    pub fn expires_in_seconds(&self) -> i64 {
        self.otp_service.config().expires_in_seconds()
    }

    /// Validate the raw phone number, then canonicalise it, before any store access
    fn canonical_phone(&self, raw: &str) -> DomainResult<String> {
        let validator = self.otp_service.phone_validator();
        if !validator.validate(raw) {
            tracing::debug!(
                phone = %mask_phone_number(raw),
                event = "invalid_phone",
                "Rejected phone number"
            );
            return Err(DomainError::InvalidPhoneNumber);
        }
        Ok(validator.normalize(raw))
    }

    fn check_code_format(&self, code: &str) -> DomainResult<()> {
        let expected_length = self.otp_service.config().code_length;
        if code.len() != expected_length || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidCodeFormat { expected_length });
        }
        Ok(())
    }

    /// Issue a code and send it by SMS
    ///
    /// A delivery failure is returned as an error even though the record
    /// already exists; the caller is expected to resend.
    pub async fn send_otp(&self, phone: &str, purpose: Option<OtpPurpose>) -> DomainResult<SendOtpResult> {
        let purpose = purpose.unwrap_or_default();
        let phone = self.canonical_phone(phone)?;

        tracing::info!(
            phone = %mask_phone_number(&phone),
            purpose = %purpose,
            "Generating OTP"
        );

        let record = self.otp_service.generate(&phone, purpose).await?;
        let message_id = self.deliver(&record).await?;

        tracing::info!(
            phone = %mask_phone_number(&record.phone_number),
            otp_id = %record.id,
            message_id = %message_id,
            event = "otp_sent",
            "OTP sent successfully"
        );

        Ok(SendOtpResult {
            otp_id: record.id,
            phone_number: record.phone_number,
            purpose: record.purpose,
            expires_at: record.expires_at,
            expires_in_seconds: self.expires_in_seconds(),
            message_id,
        })
    }

    /// Verify a code, reporting expected failures in the result
    pub async fn verify_otp(
        &self,
        phone: &str,
        code: &str,
        purpose: Option<OtpPurpose>,
    ) -> DomainResult<VerifyOtpResult> {
        let purpose = purpose.unwrap_or_default();
        let phone = self.canonical_phone(phone)?;
        self.check_code_format(code)?;

        match self.otp_service.verify(&phone, code, purpose).await {
            Ok(record) => Ok(VerifyOtpResult {
                success: true,
                message: "OTP verified successfully".to_string(),
                verified_at: record.verified_at,
                failure: None,
            }),
            Err(e) if e.is_verification_failure() => Ok(VerifyOtpResult {
                success: false,
                message: failure_message(&e).to_string(),
                verified_at: None,
                failure: Some(e),
            }),
            Err(e) => Err(e),
        }
    }

    /// Re-issue a code, subject to the resend cooldown
    pub async fn resend_otp(&self, phone: &str, purpose: Option<OtpPurpose>) -> DomainResult<ResendOtpResult> {
        let purpose = purpose.unwrap_or_default();
        let phone = self.canonical_phone(phone)?;

        tracing::info!(
            phone = %mask_phone_number(&phone),
            purpose = %purpose,
            "Resending OTP"
        );

        let record = self.otp_service.resend(&phone, purpose).await?;
        let message_id = self.deliver(&record).await?;

        tracing::info!(
            phone = %mask_phone_number(&record.phone_number),
            otp_id = %record.id,
            event = "otp_resent",
            "OTP resent successfully"
        );

        Ok(ResendOtpResult {
            otp_id: record.id,
            expires_in_seconds: self.expires_in_seconds(),
            message_id,
        })
    }

    /// Record state without the code
    pub async fn otp_status(&self, id: Uuid) -> DomainResult<OtpStatusResult> {
        let record = self.otp_service.find_by_id(id).await?;
        Ok(OtpStatusResult::from(&record))
    }

    /// Administrative delete
    pub async fn delete_otp(&self, id: Uuid) -> DomainResult<()> {
        self.otp_service.delete(id).await
    }

    async fn deliver(&self, record: &OtpRecord) -> DomainResult<String> {
        let message = sms_message(
            &record.code,
            record.purpose,
            self.otp_service.config().validity_minutes,
        );

        self.sms_service
            .send_sms(&record.phone_number, &message)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %mask_phone_number(&record.phone_number),
                    otp_id = %record.id,
                    provider = self.sms_service.provider_name(),
                    error = %e,
                    event = "sms_delivery_failed",
                    "Failed to send SMS"
                );
                DomainError::DeliveryFailed { message: e }
            })
    }
}

