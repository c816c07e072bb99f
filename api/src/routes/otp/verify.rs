use actix_web::{web, HttpResponse};
use validator::Validate;

use otp_core::repositories::OtpRepository;
use otp_core::services::verification::SmsServiceTrait;
use otp_shared::mask_phone_number;

use crate::dto::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::{handle_domain_error, invalid_request};
use crate::routes::AppState;

/// Handler for POST /api/v1/otp/verify
///
/// A wrong, expired, used or exhausted code is answered with 400 and
/// `{"success": false, "message": ...}`; the message says which.
pub async fn verify_otp<R, S>(
    state: web::Data<AppState<R, S>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    R: OtpRepository + ?Sized + 'static,
    S: SmsServiceTrait + ?Sized + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        tracing::warn!(errors = %errors, "Validation failed for verify request");
        return invalid_request();
    }

    let outcome = state
        .verification_service
        .verify_otp(&request.phone_number, &request.code, request.purpose)
        .await;

    match outcome {
        Ok(result) if result.success => HttpResponse::Ok().json(VerifyOtpResponse {
            success: true,
            message: result.message,
            verified_at: result.verified_at,
        }),
        Ok(result) => {
            tracing::info!(
                phone = %mask_phone_number(&request.phone_number),
                reason = result.failure.as_ref().map(|e| e.error_code()).unwrap_or("UNKNOWN"),
                "OTP verification failed"
            );
            HttpResponse::BadRequest().json(VerifyOtpResponse {
                success: false,
                message: result.message,
                verified_at: None,
            })
        }
        Err(error) => handle_domain_error(&error),
    }
}
