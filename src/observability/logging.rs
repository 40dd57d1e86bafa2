//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Map operator-facing level names onto tracing levels
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for log shippers, text format for terminals
//! - `RUST_LOG` overrides the configured level when set
//! - Logs go to stderr

use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogFormat;

/// Parse a level name, case-insensitively.
///
/// Besides the tracing names this accepts `success` (mapped to INFO),
/// `warning` and `critical` (mapped to WARN and ERROR).
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    match name.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(LevelFilter::TRACE),
        "debug" => Some(LevelFilter::DEBUG),
        "info" | "success" => Some(LevelFilter::INFO),
        "warn" | "warning" => Some(LevelFilter::WARN),
        "error" | "critical" => Some(LevelFilter::ERROR),
        "off" => Some(LevelFilter::OFF),
        _ => None,
    }
}

/// Install the global subscriber.
pub fn init_logging(level: LevelFilter, format: LogFormat) -> Result<(), TryInitError> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    }
}
