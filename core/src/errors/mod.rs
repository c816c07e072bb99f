//! Domain-specific error types and error handling.

use thiserror::Error;

/// Errors surfaced by the OTP lifecycle and its collaborators
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid phone number")]
    InvalidPhoneNumber,

    #[error("Invalid OTP code")]
    InvalidOtpCode,

    #[error("OTP code must be {expected_length} digits")]
    InvalidCodeFormat { expected_length: usize },

    #[error("OTP has expired")]
    OtpExpired,

    #[error("OTP has already been used")]
    OtpAlreadyUsed,

    #[error("Maximum verification attempts reached")]
    MaxAttemptsReached,

    #[error("OTP not found")]
    OtpNotFound,

    #[error("Rate limit exceeded: {window_minutes} minutes")]
    RateLimitExceeded { window_minutes: i64 },

    #[error("SMS delivery failed: {message}")]
    DeliveryFailed { message: String },

    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl DomainError {
    /// Expected verification outcomes, reported to the caller as a failed
    /// verification rather than as a fault
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidOtpCode
                | DomainError::OtpExpired
                | DomainError::OtpAlreadyUsed
                | DomainError::MaxAttemptsReached
                | DomainError::OtpNotFound
        )
    }

    /// Input rejected before any store interaction
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidPhoneNumber
                | DomainError::InvalidCodeFormat { .. }
                | DomainError::Validation { .. }
        )
    }

    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::InvalidPhoneNumber => "INVALID_PHONE",
            DomainError::InvalidOtpCode => "INVALID_OTP",
            DomainError::InvalidCodeFormat { .. } => "INVALID_CODE",
            DomainError::OtpExpired => "OTP_EXPIRED",
            DomainError::OtpAlreadyUsed => "OTP_ALREADY_USED",
            DomainError::MaxAttemptsReached => "MAX_ATTEMPTS_REACHED",
            DomainError::OtpNotFound => "OTP_NOT_FOUND",
            DomainError::RateLimitExceeded { .. } => "RATE_LIMIT",
            DomainError::Validation { .. } => "INVALID_REQUEST",
            DomainError::DeliveryFailed { .. } | DomainError::StoreUnavailable { .. } => {
                "INTERNAL_ERROR"
            }
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        DomainError::StoreUnavailable {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_failures_are_classified() {
        assert!(DomainError::OtpExpired.is_verification_failure());
        assert!(DomainError::OtpNotFound.is_verification_failure());
        assert!(!DomainError::RateLimitExceeded { window_minutes: 10 }.is_verification_failure());
        assert!(!DomainError::store("down").is_verification_failure());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::InvalidPhoneNumber.error_code(), "INVALID_PHONE");
        assert_eq!(
            DomainError::InvalidCodeFormat { expected_length: 6 }.error_code(),
            "INVALID_CODE"
        );
        assert_eq!(
            DomainError::RateLimitExceeded { window_minutes: 1 }.error_code(),
            "RATE_LIMIT"
        );
        assert_eq!(DomainError::store("timeout").error_code(), "INTERNAL_ERROR");
        assert!(DomainError::InvalidPhoneNumber.is_validation_error());
    }
}
