//! OTP cleanup service for periodic removal of expired records

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use otp_shared::OtpConfig;

use crate::errors::DomainError;
use crate::repositories::OtpRepository;
use crate::services::otp::OtpService;

/// Configuration for the cleanup service
#[derive(Debug, Clone)]
pub struct OtpCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for OtpCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            enabled: true,
        }
    }
}

impl From<&OtpConfig> for OtpCleanupConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            interval_seconds: config.cleanup_interval_seconds,
            enabled: config.cleanup_interval_seconds > 0,
        }
    }
}

/// Periodically deletes records past their expiry
pub struct OtpCleanupService<R: OtpRepository + ?Sized + 'static> {
    otp_service: Arc<OtpService<R>>,
    config: OtpCleanupConfig,
}

impl<R: OtpRepository + ?Sized + 'static> OtpCleanupService<R> {
    pub fn new(otp_service: Arc<OtpService<R>>, config: OtpCleanupConfig) -> Self {
        Self {
            otp_service,
            config,
        }
    }

    /// Run a single cleanup cycle
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let expired_deleted = self.otp_service.purge_expired().await?;
        if expired_deleted > 0 {
            info!(deleted = expired_deleted, "Deleted expired OTP records");
        }

        Ok(CleanupResult { expired_deleted })
    }

    /// Spawn the periodic sweep on the tokio runtime
    ///
    /// A failed cycle is logged and retried on the next tick.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("OTP cleanup service is disabled");
            return None;
        }
        if self.config.interval_seconds == 0 {
            warn!("OTP cleanup interval is zero, background sweep not started");
            return None;
        }

        let interval = Duration::from_secs(self.config.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "OTP cleanup service started"
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_cleanup().await {
                    error!(error = %e, "OTP cleanup cycle failed");
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of expired records deleted
    pub expired_deleted: u64,
}
