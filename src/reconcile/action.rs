//! Decision table.
//!
//! ```text
//! health  presence   action
//! Up      Absent     AddVip
//! Down    Present    RemoveVip
//! Up      Present    NoOp
//! Down    Absent     NoOp
//! ```

use std::fmt;

use crate::health::HealthStatus;
use crate::vip::VipPresence;

/// What one cycle should do to the address table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    NoOp,
    AddVip,
    RemoveVip,
}

/// Combine one health sample and one presence sample into an action.
pub fn decide(health: HealthStatus, presence: VipPresence) -> Action {
    match (health, presence) {
        (HealthStatus::Up, VipPresence::Absent) => Action::AddVip,
        (HealthStatus::Down, VipPresence::Present) => Action::RemoveVip,
        (HealthStatus::Up, VipPresence::Present) | (HealthStatus::Down, VipPresence::Absent) => {
            Action::NoOp
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::NoOp => f.write_str("no-op"),
            Action::AddVip => f.write_str("add-vip"),
            Action::RemoveVip => f.write_str("remove-vip"),
        }
    }
}
