//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce required values the schema leaves optional (port, VIP)
//! - Validate value ranges (timeouts > 0, port valid, interface name length)
//! - Produce the immutable [`ReconcileTarget`] the core runs against
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function:
//!   LoBalancerConfig → Result<ReconcileTarget, Vec<ValidationError>>
//! - Runs before the reconcile loop starts

use std::time::Duration;

use thiserror::Error;

use crate::config::schema::LoBalancerConfig;
use crate::observability::logging::parse_level;
use crate::reconcile::ReconcileTarget;
use crate::vip::VipAddress;

/// Linux `IFNAMSIZ` minus the trailing NUL.
const MAX_INTERFACE_NAME_LEN: usize = 15;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("health check port is required")]
    MissingPort,

    #[error("health check port must be between 1 and 65535")]
    ZeroPort,

    #[error("health check host must not be empty")]
    EmptyHost,

    #[error("health check host '{0}' must be a name or a bare address, without brackets or port")]
    InvalidHost(String),

    #[error("VIP address is required")]
    MissingVip,

    #[error("VIP address '{value}' is invalid: {reason}")]
    InvalidVip { value: String, reason: String },

    #[error("interface name '{name}' is invalid: {reason}")]
    InvalidInterface { name: String, reason: &'static str },

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("ip binary must not be empty")]
    EmptyIpBinary,

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
}

/// Validate a merged configuration and derive the reconcile target.
pub fn validate_config(
    config: &LoBalancerConfig,
) -> Result<ReconcileTarget, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let host = config.health_check.host.trim();
    if host.is_empty() {
        errors.push(ValidationError::EmptyHost);
    } else if host.contains(&['[', ']'][..]) || host.chars().any(char::is_whitespace) {
        errors.push(ValidationError::InvalidHost(host.to_string()));
    }

    let port = match config.health_check.port {
        None => {
            errors.push(ValidationError::MissingPort);
            None
        }
        Some(0) => {
            errors.push(ValidationError::ZeroPort);
            None
        }
        Some(port) => Some(port),
    };

    let vip = match config.vip.address.as_deref() {
        None => {
            errors.push(ValidationError::MissingVip);
            None
        }
        Some(raw) => match raw.trim().parse::<VipAddress>() {
            Ok(vip) => Some(vip),
            Err(e) => {
                errors.push(ValidationError::InvalidVip {
                    value: raw.to_string(),
                    reason: e.to_string(),
                });
                None
            }
        },
    };

    if let Err(reason) = check_interface_name(&config.vip.interface) {
        errors.push(ValidationError::InvalidInterface {
            name: config.vip.interface.clone(),
            reason,
        });
    }

    if config.health_check.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "health_check.timeout_secs" });
    }
    if config.vip.command_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "vip.command_timeout_secs" });
    }
    if config.vip.ip_binary.trim().is_empty() {
        errors.push(ValidationError::EmptyIpBinary);
    }
    if parse_level(&config.logging.level).is_none() {
        errors.push(ValidationError::UnknownLogLevel(config.logging.level.clone()));
    }

    match (port, vip) {
        (Some(port), Some(vip)) if errors.is_empty() => Ok(ReconcileTarget {
            host: host.to_string(),
            port,
            interface: config.vip.interface.clone(),
            vip,
            interval: Duration::from_secs(config.reconcile.interval_secs),
        }),
        _ => Err(errors),
    }
}

fn check_interface_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("must not be empty");
    }
    if name.len() > MAX_INTERFACE_NAME_LEN {
        return Err("longer than 15 bytes");
    }
    if name.chars().any(|c| c.is_whitespace() || c == '/' || c == ':') {
        return Err("contains whitespace, '/' or ':'");
    }
    Ok(())
}
