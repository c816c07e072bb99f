use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use otp_core::domain::{OtpPurpose, OtpStatus};
use otp_core::services::verification::OtpStatusResult;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    /// Phone number, local or international form
    /// Examples: "+994501234567", "0501234567"
    #[validate(length(min = 1, max = 32))]
    pub phone_number: String,

    /// "verification" (default), "login" or "reset"
    #[serde(default)]
    pub purpose: Option<OtpPurpose>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(length(min = 1, max = 32))]
    pub phone_number: String,

    /// Format is checked by the verification service so any mismatch maps to INVALID_CODE
    pub code: String,

    #[serde(default)]
    pub purpose: Option<OtpPurpose>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendOtpRequest {
    #[validate(length(min = 1, max = 32))]
    pub phone_number: String,

    #[serde(default)]
    pub purpose: Option<OtpPurpose>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub success: bool,
    pub message: String,
    pub expires_in_seconds: i64,
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendOtpResponse {
    pub success: bool,
    pub message: String,
    pub expires_in_seconds: i64,
}

/// Generic acknowledgement, used by the admin delete path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Record state as returned by `GET /api/v1/otp/{id}/status`; never carries the code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpStatusResponse {
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
}

impl From<OtpStatusResult> for OtpStatusResponse {
    fn from(result: OtpStatusResult) -> Self {
        Self {
            id: result.id,
            phone_number: result.phone_number,
            purpose: result.purpose,
            status: result.status,
            attempts: result.attempts,
            max_attempts: result.max_attempts,
            remaining_attempts: result.remaining_attempts,
            expires_at: result.expires_at,
            created_at: result.created_at,
            verified_at: result.verified_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_defaults_to_none() {
        let request: SendOtpRequest =
            serde_json::from_str(r#"{"phone_number":"+994501234567"}"#).unwrap();
        assert!(request.purpose.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_purpose_parses_lowercase() {
        let request: VerifyOtpRequest = serde_json::from_str(
            r#"{"phone_number":"+994501234567","code":"123456","purpose":"reset"}"#,
        )
        .unwrap();
        assert_eq!(request.purpose, Some(OtpPurpose::Reset));
    }

    #[test]
    fn test_unknown_purpose_rejected() {
        let result: Result<ResendOtpRequest, _> =
            serde_json::from_str(r#"{"phone_number":"+994501234567","purpose":"signup"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_phone_fails_validation() {
        let request = SendOtpRequest {
            phone_number: String::new(),
            purpose: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_code_passes_request_validation() {
        let request: VerifyOtpRequest =
            serde_json::from_str(r#"{"phone_number":"+994501234567","code":""}"#).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_verified_at_omitted_on_failure() {
        let response = VerifyOtpResponse {
            success: false,
            message: "Invalid OTP code. Please try again.".to_string(),
            verified_at: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("verified_at").is_none());
    }
}
