//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (host, port, vip, interface, action)
//!
//! logging.rs:
//!     → EnvFilter (configured level, RUST_LOG override)
//!     → fmt layer (text or JSON) on stderr
//! ```
//!
//! # Design Decisions
//! - Every probe result, presence result, chosen action and mutation outcome is an event
//! - No listening port is opened, so there is no metrics endpoint

pub mod logging;
