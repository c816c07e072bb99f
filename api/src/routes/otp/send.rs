use actix_web::{web, HttpResponse};
use validator::Validate;

use otp_core::repositories::OtpRepository;
use otp_core::services::verification::SmsServiceTrait;
use otp_shared::mask_phone_number;

use crate::dto::{SendOtpRequest, SendOtpResponse};
use crate::handlers::{handle_domain_error, invalid_request};
use crate::routes::AppState;

/// Handler for POST /api/v1/otp/send
///
/// # Request Body
///
/// ```json
/// { "phone_number": "+994501234567", "purpose": "login" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "OTP sent successfully",
///     "expires_in_seconds": 300,
///     "id": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// ## Errors
/// - 400 `INVALID_PHONE` / `INVALID_REQUEST`
/// - 429 `RATE_LIMIT`
/// - 500 `INTERNAL_ERROR`
pub async fn send_otp<R, S>(
    state: web::Data<AppState<R, S>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    R: OtpRepository + ?Sized + 'static,
    S: SmsServiceTrait + ?Sized + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        tracing::warn!(errors = %errors, "Validation failed for send request");
        return invalid_request();
    }

    match state
        .verification_service
        .send_otp(&request.phone_number, request.purpose)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(SendOtpResponse {
            success: true,
            message: "OTP sent successfully".to_string(),
            expires_in_seconds: result.expires_in_seconds,
            id: result.otp_id,
        }),
        Err(error) => {
            tracing::warn!(
                phone = %mask_phone_number(&request.phone_number),
                error = %error,
                "Failed to send OTP"
            );
            handle_domain_error(&error)
        }
    }
}
