//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Reconciler cycle
//!     → active.rs: TCP connect to (host, port), bounded by timeout
//!     → state.rs: Up | Down
//! ```
//!
//! # Design Decisions
//! - No retries inside a probe; the next cycle is the retry
//! - Refused, unreachable, DNS failure and timeout are all `Down`
//! - The probe is a trait so the Reconciler can run against a scripted one

pub mod active;
pub mod state;

pub use active::{HealthProbe, TcpProbe};
pub use state::HealthStatus;
