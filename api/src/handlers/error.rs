//! Domain error to HTTP response mapping
//!
//! Every failing endpoint answers with an [`ErrorResponse`] body. Faults the
//! caller cannot act on (store or delivery trouble) are logged in full and
//! reported as a generic internal error.

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};

use otp_core::errors::DomainError;
use otp_core::services::verification::failure_message;

use crate::dto::ErrorResponse;

pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request format";

fn respond(status: StatusCode, error: impl Into<String>, code: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse::new(error, code))
}

/// Convert a domain error into the matching HTTP response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::RateLimitExceeded { window_minutes } => {
            tracing::warn!(window_minutes = window_minutes, "Rate limit exceeded");
            respond(
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded. Please wait before requesting a new OTP.",
                error.error_code(),
            )
        }
        DomainError::InvalidPhoneNumber => respond(
            StatusCode::BAD_REQUEST,
            "Invalid phone number format",
            error.error_code(),
        ),
        DomainError::InvalidCodeFormat { .. } => {
            respond(StatusCode::BAD_REQUEST, error.to_string(), error.error_code())
        }
        DomainError::Validation { message } => {
            respond(StatusCode::BAD_REQUEST, message.clone(), error.error_code())
        }
        DomainError::OtpNotFound => {
            respond(StatusCode::NOT_FOUND, "OTP not found", error.error_code())
        }
        DomainError::InvalidOtpCode
        | DomainError::OtpExpired
        | DomainError::OtpAlreadyUsed
        | DomainError::MaxAttemptsReached => respond(
            StatusCode::BAD_REQUEST,
            failure_message(error),
            error.error_code(),
        ),
        DomainError::DeliveryFailed { .. } | DomainError::StoreUnavailable { .. } => {
            tracing::error!(error = %error, "Request failed");
            respond(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                error.error_code(),
            )
        }
    }
}

/// 400 for bodies that parse but fail field validation
pub fn invalid_request() -> HttpResponse {
    respond(
        StatusCode::BAD_REQUEST,
        INVALID_REQUEST_MESSAGE,
        "INVALID_REQUEST",
    )
}

/// `JsonConfig` error handler so malformed bodies get the JSON error shape
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");
    actix_web::error::InternalError::from_response(err, invalid_request()).into()
}

/// Default service for unknown routes
pub async fn not_found() -> HttpResponse {
    respond(StatusCode::NOT_FOUND, "Route not found", "ROUTE_NOT_FOUND")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(response: HttpResponse) -> ErrorResponse {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_rate_limit_maps_to_429() {
        let response = handle_domain_error(&DomainError::RateLimitExceeded { window_minutes: 10 });
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let body = body_of(response).await;
        assert!(!body.success);
        assert_eq!(body.code, "RATE_LIMIT");
    }

    #[actix_web::test]
    async fn test_invalid_phone_maps_to_400() {
        let response = handle_domain_error(&DomainError::InvalidPhoneNumber);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_of(response).await;
        assert_eq!(body.error, "Invalid phone number format");
        assert_eq!(body.code, "INVALID_PHONE");
    }

    #[actix_web::test]
    async fn test_code_format_message_uses_length() {
        let response =
            handle_domain_error(&DomainError::InvalidCodeFormat { expected_length: 6 });
        let body = body_of(response).await;
        assert_eq!(body.error, "OTP code must be 6 digits");
        assert_eq!(body.code, "INVALID_CODE");
    }

    #[actix_web::test]
    async fn test_faults_hide_details() {
        let response = handle_domain_error(&DomainError::store("connection refused"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        assert_eq!(body.error, "Internal server error");
        assert_eq!(body.code, "INTERNAL_ERROR");
    }

    #[actix_web::test]
    async fn test_not_found_for_admin_paths() {
        let response = handle_domain_error(&DomainError::OtpNotFound);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(response).await.code, "OTP_NOT_FOUND");
    }
}
