//! Tracing subscriber setup for the binary

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use otp_shared::{LogFormat, LoggingConfig};

/// Filter used when `RUST_LOG` is not set
pub fn default_directives(level: &str) -> String {
    format!("{},sqlx=warn,actix_server=info", level)
}

/// Install the global subscriber
///
/// `RUST_LOG` overrides the configured level. Calling this twice is harmless;
/// the second call only reports that a subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
    };

    if let Err(e) = result {
        eprintln!("Tracing subscriber already installed: {}", e);
    }
}
