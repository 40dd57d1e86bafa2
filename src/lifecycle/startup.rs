//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate the merged configuration
//! - Construct the probe and the controller and wire them into the Reconciler
//! - Log the startup banner
//!
//! # Design Decisions
//! - Fail fast: any configuration error is fatal before the first cycle

use std::sync::Arc;
use std::time::Duration;

use crate::config::{validate_config, ConfigError, LoBalancerConfig};
use crate::health::TcpProbe;
use crate::reconcile::Reconciler;
use crate::vip::IpCommandController;

/// Build a Reconciler backed by a TCP probe and the `ip` tool.
pub fn build_reconciler(config: &LoBalancerConfig) -> Result<Reconciler, ConfigError> {
    let target = validate_config(config).map_err(ConfigError::Validation)?;

    let probe = TcpProbe::new(Duration::from_secs(config.health_check.timeout_secs));
    let controller = IpCommandController::new(
        config.vip.ip_binary.clone(),
        Duration::from_secs(config.vip.command_timeout_secs),
    );

    Ok(Reconciler::new(target, Arc::new(probe), Arc::new(controller)))
}

/// Log the program name and every effective option.
pub fn log_banner(program: &str, config: &LoBalancerConfig) {
    tracing::info!("{} Started", program);
    tracing::info!("  --log-level \"{}\"", config.logging.level);
    tracing::info!("  --log-format {:?}", config.logging.format);
    tracing::info!("  --sleep-time {}", config.reconcile.interval_secs);
    tracing::info!("  --port {}", display_opt(config.health_check.port));
    tracing::info!("  --ip \"{}\"", config.health_check.host);
    tracing::info!("  --probe-timeout {}", config.health_check.timeout_secs);
    tracing::info!("  --vip \"{}\"", display_opt(config.vip.address.as_deref()));
    tracing::info!("  --interface \"{}\"", config.vip.interface);
    tracing::info!("  --command-timeout {}", config.vip.command_timeout_secs);
}

fn display_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "<unset>".to_string(), |v| v.to_string())
}
