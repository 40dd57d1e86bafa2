//! Service health state.
//!
//! # States
//! - Up: the service accepted a connection during this cycle
//! - Down: it did not, for whatever reason
//!
//! # Design Decisions
//! - Sampled fresh each cycle, never cached
//! - No hysteresis: a single failed probe is `Down`

use std::fmt;

/// Result of one health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthStatus {
    Up,
    Down,
}

impl HealthStatus {
    pub fn is_up(self) -> bool {
        matches!(self, HealthStatus::Up)
    }
}

impl From<bool> for HealthStatus {
    fn from(up: bool) -> Self {
        if up {
            HealthStatus::Up
        } else {
            HealthStatus::Down
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Up => f.write_str("up"),
            HealthStatus::Down => f.write_str("down"),
        }
    }
}
