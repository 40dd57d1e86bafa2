//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Merge config → Validate → Build probe + controller → Reconciler
//!
//! Shutdown (shutdown.rs):
//!     Signal received → loop notices while sleeping → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Startup errors are configuration errors and are fatal
//! - Shutdown never interrupts a cycle, so the VIP is not left half-applied

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
