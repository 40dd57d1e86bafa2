//! Command line arguments.
//!
//! Flags override values from the optional `--config` file, which in turn
//! override the built-in defaults. `PORT`, `ADDRESS` and `LOG_LEVEL` are read
//! from the environment when the matching flag is absent.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{LoBalancerConfig, LogFormat};

#[derive(Parser, Debug, Default)]
#[command(name = "lobalancer")]
#[command(
    version,
    about = "Keep a virtual IP bound while a local service accepts connections",
    long_about = None
)]
pub struct LoBalancerArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// trace, debug, info, success, warning, error or critical
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log line format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Seconds between cycles; 0 runs a single cycle and exits
    #[arg(long)]
    pub sleep_time: Option<u64>,

    /// Health check port
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Health check host
    #[arg(long)]
    pub ip: Option<String>,

    /// Virtual IP to bind while healthy
    #[arg(long, env = "ADDRESS")]
    pub vip: Option<String>,

    /// Interface the VIP is bound to
    #[arg(long)]
    pub interface: Option<String>,

    /// Health check connect timeout in seconds
    #[arg(long)]
    pub probe_timeout: Option<u64>,

    /// Timeout for each `ip` invocation in seconds
    #[arg(long)]
    pub command_timeout: Option<u64>,
}

impl LoBalancerArgs {
    /// Overlay the flags that were given onto `config`.
    pub fn apply(self, mut config: LoBalancerConfig) -> LoBalancerConfig {
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
        if let Some(secs) = self.sleep_time {
            config.reconcile.interval_secs = secs;
        }
        if let Some(port) = self.port {
            config.health_check.port = Some(port);
        }
        if let Some(host) = self.ip {
            config.health_check.host = host;
        }
        if let Some(timeout) = self.probe_timeout {
            config.health_check.timeout_secs = timeout;
        }
        if let Some(vip) = self.vip {
            config.vip.address = Some(vip);
        }
        if let Some(interface) = self.interface {
            config.vip.interface = interface;
        }
        if let Some(timeout) = self.command_timeout {
            config.vip.command_timeout_secs = timeout;
        }
        config
    }
}
