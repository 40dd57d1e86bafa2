//! VIP controller subsystem.
//!
//! # Data Flow
//! ```text
//! Reconciler
//!     → controller.rs: is_present / add / remove (trait)
//!         → iproute.rs: `ip` invocations against the live kernel table
//!         → memory.rs: in-process table (tests, rehearsal)
//! ```
//!
//! # Design Decisions
//! - The controller is constructed explicitly and handed to the Reconciler
//! - The VIP is always a single-host binding (/32 or /128)
//! - Mutations are idempotent; errors are values, never panics

pub mod address;
pub mod controller;
pub mod iproute;
pub mod memory;

pub use address::{AddressError, VipAddress, VipPresence};
pub use controller::{MutationOutcome, VipController, VipError};
pub use iproute::IpCommandController;
pub use memory::{ControllerCall, MemoryController};
