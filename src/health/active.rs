//! Active TCP health probing.
//!
//! # Responsibilities
//! - Open a TCP connection to the monitored service
//! - Fold every failure mode into `Down`
//! - Release the socket before returning

use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time;

use crate::health::HealthStatus;

/// Something that can tell whether a `(host, port)` is reachable.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Probe once. Never fails; unreachable is `Down`.
    async fn probe(&self, host: &str, port: u16) -> HealthStatus;
}

/// Probe that succeeds when a TCP connect completes within `timeout`.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

#[async_trait]
impl HealthProbe for TcpProbe {
    async fn probe(&self, host: &str, port: u16) -> HealthStatus {
        tracing::debug!(host = %host, port, "Attempting to connect");

        // Resolution happens inside connect, so DNS stalls count against the timeout too.
        match time::timeout(self.timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => {
                tracing::debug!(host = %host, port, "Connected");
                drop(stream);
                HealthStatus::Up
            }
            Ok(Err(e)) => {
                tracing::debug!(host = %host, port, error = %e, "Connection failed");
                HealthStatus::Down
            }
            Err(_) => {
                tracing::debug!(
                    host = %host,
                    port,
                    timeout = ?self.timeout,
                    "Connection timed out"
                );
                HealthStatus::Down
            }
        }
    }
}
