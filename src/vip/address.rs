//! VIP address and presence types.

use std::fmt;
use std::net::{AddrParseError, IpAddr};
use std::str::FromStr;

use thiserror::Error;

/// Why a string is not usable as a VIP.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("not an IPv4 or IPv6 address: {0}")]
    Malformed(#[from] AddrParseError),

    #[error("the unspecified address cannot be advertised")]
    Unspecified,

    #[error("multicast addresses cannot be bound to an interface")]
    Multicast,
}

/// A single-host virtual address (`/32` for IPv4, `/128` for IPv6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VipAddress(IpAddr);

impl VipAddress {
    pub fn new(ip: IpAddr) -> Result<Self, AddressError> {
        if ip.is_unspecified() {
            return Err(AddressError::Unspecified);
        }
        if ip.is_multicast() {
            return Err(AddressError::Multicast);
        }
        Ok(Self(ip))
    }

    pub fn ip(&self) -> IpAddr {
        self.0
    }

    /// Prefix length of a single-host binding for this family.
    pub fn host_prefix(&self) -> u8 {
        match self.0 {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        }
    }

    /// `address/prefix` form as passed to the network stack.
    pub fn cidr(&self) -> String {
        format!("{}/{}", self.0, self.host_prefix())
    }
}

impl FromStr for VipAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.parse::<IpAddr>()?)
    }
}

impl fmt::Display for VipAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Whether the VIP is currently bound to the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VipPresence {
    Present,
    Absent,
}

impl VipPresence {
    pub fn is_present(self) -> bool {
        matches!(self, VipPresence::Present)
    }
}

impl From<bool> for VipPresence {
    fn from(present: bool) -> Self {
        if present {
            VipPresence::Present
        } else {
            VipPresence::Absent
        }
    }
}

impl fmt::Display for VipPresence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VipPresence::Present => f.write_str("present"),
            VipPresence::Absent => f.write_str("absent"),
        }
    }
}
