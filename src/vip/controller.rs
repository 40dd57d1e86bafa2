//! The VIP controller contract.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::vip::{VipAddress, VipPresence};

/// Errors surfaced by a controller. None of them are fatal to the process.
#[derive(Debug, Error)]
pub enum VipError {
    /// The network-configuration tool could not be started.
    #[error("failed to run '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// The call did not complete within the configured bound.
    #[error("{operation} timed out after {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    #[error("interface '{0}' not found")]
    InterfaceNotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The network stack rejected the request for another reason.
    #[error("{operation} failed ({status}): {stderr}")]
    CommandFailed {
        operation: &'static str,
        status: String,
        stderr: String,
    },

    /// The address table could not be interpreted.
    #[error("unreadable address listing: {0}")]
    Parse(String),

    #[error("request rejected: {0}")]
    Rejected(String),
}

/// What a mutation actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The address table changed.
    Applied,
    /// The address table was already in the requested state.
    AlreadyInState,
}

/// Reads and mutates the addresses bound to a network interface.
///
/// `add` and `remove` must be idempotent: asking for the state that already
/// holds returns `Ok(MutationOutcome::AlreadyInState)`.
#[async_trait]
pub trait VipController: Send + Sync {
    /// Read the live address table and report whether the VIP is bound.
    async fn is_present(&self, interface: &str, vip: &VipAddress) -> Result<VipPresence, VipError>;

    /// Bind the VIP as a host-scope address.
    async fn add(&self, interface: &str, vip: &VipAddress) -> Result<MutationOutcome, VipError>;

    /// Unbind the VIP.
    async fn remove(&self, interface: &str, vip: &VipAddress) -> Result<MutationOutcome, VipError>;
}
