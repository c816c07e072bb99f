use actix_web::{web, HttpResponse};
use validator::Validate;

use otp_core::repositories::OtpRepository;
use otp_core::services::verification::SmsServiceTrait;
use otp_shared::mask_phone_number;

use crate::dto::{ResendOtpRequest, ResendOtpResponse};
use crate::handlers::{handle_domain_error, invalid_request};
use crate::routes::AppState;

/// Handler for POST /api/v1/otp/resend
///
/// Answers 429 `RATE_LIMIT` while the previous code is still valid and was
/// issued within the resend cooldown.
pub async fn resend_otp<R, S>(
    state: web::Data<AppState<R, S>>,
    request: web::Json<ResendOtpRequest>,
) -> HttpResponse
where
    R: OtpRepository + ?Sized + 'static,
    S: SmsServiceTrait + ?Sized + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        tracing::warn!(errors = %errors, "Validation failed for resend request");
        return invalid_request();
    }

    match state
        .verification_service
        .resend_otp(&request.phone_number, request.purpose)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(ResendOtpResponse {
            success: true,
            message: "OTP resent successfully".to_string(),
            expires_in_seconds: result.expires_in_seconds,
        }),
        Err(error) => {
            tracing::warn!(
                phone = %mask_phone_number(&request.phone_number),
                error = %error,
                "Failed to resend OTP"
            );
            handle_domain_error(&error)
        }
    }
}
