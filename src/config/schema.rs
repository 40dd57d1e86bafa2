//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the balancer.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the VIP balancer.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct LoBalancerConfig {
    /// The service whose reachability decides VIP presence.
    pub health_check: HealthCheckConfig,

    /// The virtual address and the interface it lives on.
    pub vip: VipConfig,

    /// Loop cadence.
    pub reconcile: ReconcileConfig,

    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Health check configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Host to connect to (name or address).
    pub host: String,

    /// Port to connect to. Required.
    pub port: Option<u16>,

    /// Connect timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: None,
            timeout_secs: 3,
        }
    }
}

/// Virtual IP configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct VipConfig {
    /// IPv4 or IPv6 literal. Required.
    pub address: Option<String>,

    /// Interface the VIP is bound to.
    pub interface: String,

    /// Upper bound for a single `ip` invocation in seconds.
    pub command_timeout_secs: u64,

    /// Path or name of the iproute2 binary.
    pub ip_binary: String,
}

impl Default for VipConfig {
    fn default() -> Self {
        Self {
            address: None,
            interface: "lo".to_string(),
            command_timeout_secs: 5,
            ip_binary: "ip".to_string(),
        }
    }
}

/// Reconcile loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Seconds between cycles. Zero runs a single cycle.
    pub interval_secs: u64,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self { interval_secs: 5 }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level name (trace, debug, info, success, warning, error, critical).
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}
