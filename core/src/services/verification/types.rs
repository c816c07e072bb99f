//! Types for orchestration results

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{OtpRecord, OtpStatus};
use crate::domain::value_objects::OtpPurpose;
use crate::errors::DomainError;

/// Result of issuing a code
#[derive(Debug, Clone)]
pub struct SendOtpResult {
    pub otp_id: Uuid,
    /// Canonical phone the code was sent to
    pub phone_number: String,
    pub purpose: OtpPurpose,
    pub expires_at: DateTime<Utc>,
    pub expires_in_seconds: i64,
    /// The SMS message ID from the provider
    pub message_id: String,
}

/// Result of re-issuing a code
#[derive(Debug, Clone)]
pub struct ResendOtpResult {
    pub otp_id: Uuid,
    pub expires_in_seconds: i64,
    pub message_id: String,
}

/// Result of verifying a code
///
/// Verification failures are an expected outcome and come back here with
/// `success == false`; only faults are returned as errors.
#[derive(Debug, Clone)]
pub struct VerifyOtpResult {
    pub success: bool,
    pub message: String,
    pub verified_at: Option<DateTime<Utc>>,
    /// The failure, when `success` is false
    pub failure: Option<DomainError>,
}

/// Record view without the code
#[derive(Debug, Clone)]
pub struct OtpStatusResult {
    pub id: Uuid,
    /// Masked phone number
    pub phone_number: String,
    pub purpose: OtpPurpose,
    pub status: OtpStatus,
    pub attempts: i32,
    pub max_attempts: i32,
    pub remaining_attempts: i32,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
}

impl From<&OtpRecord> for OtpStatusResult {
    fn from(record: &OtpRecord) -> Self {
        Self {
            id: record.id,
            phone_number: otp_shared::mask_phone_number(&record.phone_number),
            purpose: record.purpose,
            status: record.status(),
            attempts: record.attempts,
            max_attempts: record.max_attempts,
            remaining_attempts: record.remaining_attempts(),
            expires_at: record.expires_at,
            created_at: record.created_at,
            verified_at: record.verified_at,
        }
    }
}

/// SMS body for a freshly issued code
pub fn sms_message(code: &str, purpose: OtpPurpose, validity_minutes: i64) -> String {
    format!(
        "Your {} code is: {}. Valid for {} minutes. Do not share this code.",
        purpose.label(),
        code,
        validity_minutes
    )
}

/// Human-readable reason for a failed request
pub fn failure_message(error: &DomainError) -> &'static str {
    match error {
        DomainError::OtpExpired => "OTP has expired. Please request a new one.",
        DomainError::OtpAlreadyUsed => "OTP has already been used. Please request a new one.",
        DomainError::MaxAttemptsReached => {
            "Maximum verification attempts reached. Please request a new OTP."
        }
        DomainError::InvalidOtpCode => "Invalid OTP code. Please try again.",
        DomainError::OtpNotFound => "OTP not found. Please request a new one.",
        DomainError::RateLimitExceeded { .. } => {
            "Too many requests. Please wait before requesting a new OTP."
        }
        _ => "Verification failed. Please try again.",
    }
}
