//! Reconciliation subsystem.
//!
//! # Data Flow
//! ```text
//! every cycle (reconciler.rs):
//!     HealthProbe::probe           → HealthStatus
//!     VipController::is_present    → VipPresence
//!     action.rs decide(health, presence) → Action
//!     VipController::add / remove  (AddVip / RemoveVip only)
//!     sleep(interval)              (skipped in one-shot mode)
//! ```
//!
//! # Design Decisions
//! - No state survives a cycle; every decision uses a fresh snapshot
//! - The decision is a pure function so it can be tested exhaustively
//! - One cycle at a time; no locking is needed

pub mod action;
pub mod reconciler;
pub mod target;

pub use action::{decide, Action};
pub use reconciler::{CycleOutcome, CycleReport, Reconciler};
pub use target::{ReconcileTarget, RunMode};
