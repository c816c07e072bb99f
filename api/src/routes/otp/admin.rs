//! Administrative record access by id

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use otp_core::errors::DomainError;
use otp_core::repositories::OtpRepository;
use otp_core::services::verification::SmsServiceTrait;

use crate::dto::{MessageResponse, OtpStatusResponse};
use crate::handlers::handle_domain_error;
use crate::routes::AppState;

fn parse_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::Validation {
        message: "Invalid OTP id".to_string(),
    })
}

/// Handler for GET /api/v1/otp/{id}/status
pub async fn otp_status<R, S>(
    state: web::Data<AppState<R, S>>,
    path: web::Path<String>,
) -> HttpResponse
where
    R: OtpRepository + ?Sized + 'static,
    S: SmsServiceTrait + ?Sized + 'static,
{
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(error) => return handle_domain_error(&error),
    };

    match state.verification_service.otp_status(id).await {
        Ok(status) => HttpResponse::Ok().json(OtpStatusResponse::from(status)),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for DELETE /api/v1/otp/{id}
pub async fn delete_otp<R, S>(
    state: web::Data<AppState<R, S>>,
    path: web::Path<String>,
) -> HttpResponse
where
    R: OtpRepository + ?Sized + 'static,
    S: SmsServiceTrait + ?Sized + 'static,
{
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(error) => return handle_domain_error(&error),
    };

    match state.verification_service.delete_otp(id).await {
        Ok(()) => {
            tracing::info!(otp_id = %id, event = "otp_deleted", "OTP deleted");
            HttpResponse::Ok().json(MessageResponse {
                success: true,
                message: "OTP deleted successfully".to_string(),
            })
        }
        Err(error) => handle_domain_error(&error),
    }
}
