//! Immutable reconcile target and loop mode.

use std::time::Duration;

use crate::vip::VipAddress;

/// What the loop keeps in agreement. Built once by config validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileTarget {
    /// Health check host.
    pub host: String,
    /// Health check port.
    pub port: u16,
    /// Interface the VIP is bound to.
    pub interface: String,
    pub vip: VipAddress,
    /// Time between cycles; zero runs exactly one cycle.
    pub interval: Duration,
}

impl ReconcileTarget {
    pub fn mode(&self) -> RunMode {
        RunMode::from_interval(self.interval)
    }
}

/// How many cycles the loop runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// A single cycle, then return.
    Once,
    /// Cycle, sleep, repeat until shutdown.
    Every(Duration),
}

impl RunMode {
    pub fn from_interval(interval: Duration) -> Self {
        if interval.is_zero() {
            RunMode::Once
        } else {
            RunMode::Every(interval)
        }
    }
}
