use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;

use otp_api::{create_app, telemetry, AppState, StoreProbe};
use otp_core::repositories::{InMemoryOtpRepository, OtpRepository};
use otp_core::services::{
    OtpCleanupConfig, OtpCleanupService, OtpService, OtpServiceConfig, VerificationService,
};
use otp_infra::database::{DatabasePool, MySqlOtpRepository};
use otp_infra::sms::create_sms_service;
use otp_shared::{AppConfig, DatabaseConfig, StoreBackend};

/// Build the configured store and the probe `/health` uses for it
async fn build_store(
    config: &DatabaseConfig,
) -> anyhow::Result<(Arc<dyn OtpRepository>, StoreProbe)> {
    match config.backend {
        StoreBackend::Mysql => {
            let pool = DatabasePool::new(config.clone())
                .await
                .context("Failed to connect to database")?;
            if config.run_migrations {
                pool.run_migrations()
                    .await
                    .context("Failed to run database migrations")?;
            }
            tracing::info!(stats = %pool.get_statistics(), "Using MySQL OTP store");

            let repository: Arc<dyn OtpRepository> =
                Arc::new(MySqlOtpRepository::new(pool.get_pool().clone()));
            Ok((repository, StoreProbe::Pool(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory OTP store; records are lost on restart");
            let repository: Arc<dyn OtpRepository> = Arc::new(InMemoryOtpRepository::new());
            Ok((repository.clone(), StoreProbe::Repository(repository)))
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    telemetry::init_tracing(&config.logging);

    tracing::info!(
        environment = %config.environment,
        backend = ?config.database.backend,
        "Starting SMS OTP service"
    );

    let (repository, store_probe) = build_store(&config.database).await?;

    let sms_service = create_sms_service(&config.sms);
    let sms_provider = sms_service.provider_name().to_string();

    let otp_service = Arc::new(OtpService::new(
        repository,
        OtpServiceConfig::from(&config.otp),
    ));
    let verification_service = Arc::new(VerificationService::new(
        otp_service.clone(),
        sms_service,
    ));

    let cleanup_service = Arc::new(OtpCleanupService::new(
        otp_service,
        OtpCleanupConfig::from(&config.otp),
    ));
    let cleanup_task = cleanup_service.start_background_task();

    let app_state = web::Data::new(AppState::new(
        verification_service,
        store_probe,
        sms_provider,
    ));
    let json_limit = config.server.max_payload_size;
    let bind_address = config.server.bind_address();

    tracing::info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(app_state.clone(), json_limit))
        .keep_alive(Duration::from_secs(config.server.keep_alive))
        .shutdown_timeout(config.server.shutdown_timeout);
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server error")?;

    if let Some(handle) = cleanup_task {
        handle.abort();
    }
    tracing::info!("Server stopped");

    Ok(())
}
