//! Loopback VIP balancer.
//!
//! Binds a virtual IP to an interface while a service answers on a TCP port
//! and withdraws it while the service does not, so that whatever routes to
//! the VIP (ECMP, ARP, an upstream balancer) fails over to another node.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                  LOBALANCER                   │
//!                    │                                               │
//!                    │   ┌──────────┐   probe    ┌────────────────┐  │
//!   Local service ◀──┼───│  health  │◀───────────│                │  │
//!   (host:port)      │   └──────────┘            │   reconcile    │  │
//!                    │                           │ probe → read → │  │
//!                    │   ┌──────────┐  read/add/ │ decide → act   │  │
//!   Interface  ◀─────┼───│   vip    │◀───remove──│   → sleep      │  │
//!   address table    │   └──────────┘            └────────────────┘  │
//!                    │                                               │
//!                    │   config · lifecycle · observability          │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::Path;

use clap::Parser;

use lobalancer::cli::LoBalancerArgs;
use lobalancer::config::{load_config, LoBalancerConfig};
use lobalancer::lifecycle::{signals, startup, Shutdown};
use lobalancer::observability::logging::{init_logging, parse_level};
use tracing_subscriber::filter::LevelFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = LoBalancerArgs::parse();

    let file_config = match &args.config {
        Some(path) => load_config(path)?,
        None => LoBalancerConfig::default(),
    };
    let config = args.apply(file_config);

    // An unknown level is reported by validation below, once logging is up.
    let level = parse_level(&config.logging.level).unwrap_or(LevelFilter::INFO);
    init_logging(level, config.logging.format)?;

    let program = std::env::args()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "lobalancer".to_string());
    startup::log_banner(&program, &config);

    let reconciler = match startup::build_reconciler(&config) {
        Ok(reconciler) => reconciler,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    let shutdown = Shutdown::new();
    let run = reconciler.run(shutdown.subscribe());
    tokio::pin!(run);

    let cycles = tokio::select! {
        cycles = &mut run => cycles,
        _ = signals::forward_signals(&shutdown) => run.await,
    };

    tracing::info!(cycles, "Shutdown complete");
    Ok(())
}
