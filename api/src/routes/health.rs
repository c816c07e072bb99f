//! Service info, health and readiness endpoints

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::{web, HttpResponse};
use serde_json::json;

use otp_core::repositories::OtpRepository;
use otp_core::services::verification::SmsServiceTrait;
use otp_infra::database::DatabasePool;
use otp_shared::{HealthResponse, ServiceHealth};

use super::AppState;

const HEALTH_CHECK_PHONE: &str = "health-check";

/// How the health endpoints reach the OTP store
#[derive(Clone)]
pub enum StoreProbe {
    /// `SELECT 1` on the MySQL pool
    Pool(DatabasePool),
    /// A cheap read through the repository itself
    Repository(Arc<dyn OtpRepository>),
}

impl StoreProbe {
    /// Probe the store, giving up after `timeout`
    pub async fn check(&self, timeout: Duration) -> ServiceHealth {
        let start = Instant::now();

        let outcome = match self {
            StoreProbe::Pool(pool) => {
                match tokio::time::timeout(timeout, pool.health_check()).await {
                    Ok(Ok(true)) => Ok(()),
                    Ok(Ok(false)) => Err("unexpected health check result".to_string()),
                    Ok(Err(e)) => Err(e.to_string()),
                    Err(_) => Err("health check timed out".to_string()),
                }
            }
            StoreProbe::Repository(repository) => {
                let probe = repository.count_recent(HEALTH_CHECK_PHONE, 0);
                match tokio::time::timeout(timeout, probe).await {
                    Ok(Ok(_)) => Ok(()),
                    Ok(Err(e)) => Err(e.to_string()),
                    Err(_) => Err("health check timed out".to_string()),
                }
            }
        };

        match outcome {
            Ok(()) => ServiceHealth::healthy(start.elapsed().as_millis() as u64),
            Err(message) => {
                tracing::warn!(error = %message, "Store health check failed");
                ServiceHealth::unhealthy(message)
            }
        }
    }
}

fn probe_timeout<R, S>(state: &AppState<R, S>) -> Duration
where
    R: OtpRepository + ?Sized,
    S: SmsServiceTrait + ?Sized,
{
    state
        .verification_service
        .otp_service()
        .config()
        .store_timeout
}

/// Handler for GET /health
///
/// 200 while every dependency is usable, 503 otherwise.
pub async fn health_check<R, S>(state: web::Data<AppState<R, S>>) -> HttpResponse
where
    R: OtpRepository + ?Sized + 'static,
    S: SmsServiceTrait + ?Sized + 'static,
{
    let database = state.store_probe.check(probe_timeout(&state)).await;
    let sms = ServiceHealth {
        message: Some(state.sms_provider.clone()),
        ..ServiceHealth::healthy(0)
    };

    let mut services = HashMap::new();
    services.insert("database".to_string(), database);
    services.insert("sms".to_string(), sms);

    let response = HealthResponse::from_services(services, env!("CARGO_PKG_VERSION"));
    if response.is_healthy() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Handler for GET /ready
pub async fn readiness<R, S>(state: web::Data<AppState<R, S>>) -> HttpResponse
where
    R: OtpRepository + ?Sized + 'static,
    S: SmsServiceTrait + ?Sized + 'static,
{
    let database = state.store_probe.check(probe_timeout(&state)).await;
    if database.status == otp_shared::HealthStatus::Healthy {
        HttpResponse::Ok().json(json!({ "status": "ready" }))
    } else {
        HttpResponse::ServiceUnavailable().json(json!({
            "status": "not ready",
            "error": "database unavailable",
        }))
    }
}

/// Handler for GET /
pub async fn service_info() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "service": "SMS OTP Service",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    }))
}
