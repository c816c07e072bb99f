//! HTTP routes
//!
//! - `GET /`, `GET /health`, `GET /ready`: service info and probes
//! - `/api/v1/otp`: send, verify, resend, status and administrative delete

pub mod health;
pub mod otp;

use std::sync::Arc;

use actix_web::web;

use otp_core::repositories::OtpRepository;
use otp_core::services::verification::{SmsServiceTrait, VerificationService};

pub use health::StoreProbe;

/// Application state that holds shared services
pub struct AppState<R, S>
where
    R: OtpRepository + ?Sized,
    S: SmsServiceTrait + ?Sized,
{
    pub verification_service: Arc<VerificationService<R, S>>,
    /// Liveness check for the OTP store
    pub store_probe: StoreProbe,
    /// Provider name reported by `/health`
    pub sms_provider: String,
}

impl<R, S> AppState<R, S>
where
    R: OtpRepository + ?Sized,
    S: SmsServiceTrait + ?Sized,
{
    pub fn new(
        verification_service: Arc<VerificationService<R, S>>,
        store_probe: StoreProbe,
        sms_provider: impl Into<String>,
    ) -> Self {
        Self {
            verification_service,
            store_probe,
            sms_provider: sms_provider.into(),
        }
    }
}

/// Register every route on `cfg`
pub fn configure<R, S>(cfg: &mut web::ServiceConfig)
where
    R: OtpRepository + ?Sized + 'static,
    S: SmsServiceTrait + ?Sized + 'static,
{
    cfg.route("/", web::get().to(health::service_info))
        .route("/health", web::get().to(health::health_check::<R, S>))
        .route("/ready", web::get().to(health::readiness::<R, S>))
        .service(
            web::scope("/api/v1/otp")
                .route("/send", web::post().to(otp::send::send_otp::<R, S>))
                .route("/verify", web::post().to(otp::verify::verify_otp::<R, S>))
                .route("/resend", web::post().to(otp::resend::resend_otp::<R, S>))
                .route("/{id}/status", web::get().to(otp::admin::otp_status::<R, S>))
                .route("/{id}", web::delete().to(otp::admin::delete_otp::<R, S>)),
        );
}
