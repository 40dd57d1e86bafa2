//! Loopback VIP balancer library.
//!
//! Keeps a virtual IP bound to an interface exactly while a monitored local
//! service accepts TCP connections.

pub mod cli;
pub mod config;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod reconcile;
pub mod vip;

pub use config::LoBalancerConfig;
pub use lifecycle::Shutdown;
pub use reconcile::Reconciler;
