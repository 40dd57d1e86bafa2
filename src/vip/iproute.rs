//! iproute2-backed controller.
//!
//! # Responsibilities
//! - List interface addresses with `ip -o addr show dev <if>`
//! - Bind with `ip addr add <vip>/<host prefix> dev <if> scope host`
//! - Unbind with `ip addr del <vip>/<host prefix> dev <if>`
//!
//! # Design Decisions
//! - Every invocation is bounded by `command_timeout`; the child is killed on expiry
//! - "already there" / "already gone" replies count as success
//! - Nothing is cached; presence is read from the kernel every time

use std::net::IpAddr;
use std::process::{Output, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time;

use crate::vip::{MutationOutcome, VipAddress, VipController, VipError, VipPresence};

const ADD_EXISTS: &str = "File exists";
const DEL_MISSING: &str = "Cannot assign requested address";

/// Controller that shells out to the `ip` tool.
#[derive(Debug, Clone)]
pub struct IpCommandController {
    binary: String,
    command_timeout: Duration,
}

impl IpCommandController {
    pub fn new(binary: impl Into<String>, command_timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            command_timeout,
        }
    }

    async fn run(&self, operation: &'static str, args: &[&str]) -> Result<Output, VipError> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args).stdin(Stdio::null()).kill_on_drop(true);

        tracing::trace!(binary = %self.binary, ?args, "Running");

        time::timeout(self.command_timeout, cmd.output())
            .await
            .map_err(|_| VipError::Timeout {
                operation,
                timeout: self.command_timeout,
            })?
            .map_err(|source| VipError::Spawn {
                binary: self.binary.clone(),
                source,
            })
    }
}

#[async_trait]
impl VipController for IpCommandController {
    async fn is_present(&self, interface: &str, vip: &VipAddress) -> Result<VipPresence, VipError> {
        let output = self
            .run("address listing", &["-o", "addr", "show", "dev", interface])
            .await?;
        if !output.status.success() {
            return Err(classify_failure("address listing", interface, &output));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let bound = parse_addresses(&stdout)?;
        tracing::trace!(interface = %interface, ?bound, "Addresses bound");

        Ok(bound
            .iter()
            .any(|&(ip, prefix)| ip == vip.ip() && prefix == vip.host_prefix())
            .into())
    }

    async fn add(&self, interface: &str, vip: &VipAddress) -> Result<MutationOutcome, VipError> {
        let cidr = vip.cidr();
        let output = self
            .run("address add", &["addr", "add", &cidr, "dev", interface, "scope", "host"])
            .await?;
        if output.status.success() {
            return Ok(MutationOutcome::Applied);
        }
        if stderr_of(&output).contains(ADD_EXISTS) {
            // The kernel also says "File exists" when the address is bound
            // with another prefix; only the exact binding counts as done.
            if self.is_present(interface, vip).await?.is_present() {
                tracing::debug!(vip = %cidr, interface = %interface, "Address already bound");
                return Ok(MutationOutcome::AlreadyInState);
            }
            tracing::debug!(
                vip = %cidr,
                interface = %interface,
                "Address bound with a different prefix"
            );
        }
        Err(classify_failure("address add", interface, &output))
    }

    async fn remove(&self, interface: &str, vip: &VipAddress) -> Result<MutationOutcome, VipError> {
        let cidr = vip.cidr();
        let output = self
            .run("address delete", &["addr", "del", &cidr, "dev", interface])
            .await?;
        if output.status.success() {
            return Ok(MutationOutcome::Applied);
        }
        if stderr_of(&output).contains(DEL_MISSING) {
            tracing::debug!(vip = %cidr, interface = %interface, "Address already unbound");
            return Ok(MutationOutcome::AlreadyInState);
        }
        Err(classify_failure("address delete", interface, &output))
    }
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

fn classify_failure(operation: &'static str, interface: &str, output: &Output) -> VipError {
    let stderr = stderr_of(output);
    if stderr.contains("Cannot find device") || stderr.contains("does not exist") {
        VipError::InterfaceNotFound(interface.to_string())
    } else if stderr.contains("Operation not permitted") || stderr.contains("Permission denied") {
        VipError::PermissionDenied(stderr)
    } else {
        VipError::CommandFailed {
            operation,
            status: output.status.to_string(),
            stderr,
        }
    }
}

/// Extract `(address, prefix)` pairs from `ip -o addr show` output.
///
/// Point-to-point entries (`inet A peer B/N`) carry no prefix on the local
/// side and are reported with the single-host prefix.
pub fn parse_addresses(listing: &str) -> Result<Vec<(IpAddr, u8)>, VipError> {
    let mut bound = Vec::new();

    for line in listing.lines() {
        let mut tokens = line.split_whitespace();
        while let Some(token) = tokens.next() {
            if token != "inet" && token != "inet6" {
                continue;
            }
            let Some(entry) = tokens.next() else {
                return Err(VipError::Parse(format!(
                    "'{}' without address in: {}",
                    token,
                    line.trim()
                )));
            };
            let (addr, prefix) = match entry.split_once('/') {
                Some((addr, prefix)) => (addr, Some(prefix)),
                None => (entry, None),
            };
            let ip: IpAddr = addr
                .parse()
                .map_err(|_| VipError::Parse(format!("bad address '{}'", entry)))?;
            let prefix = match prefix {
                Some(p) => p
                    .parse::<u8>()
                    .map_err(|_| VipError::Parse(format!("bad prefix '{}'", entry)))?,
                None if ip.is_ipv4() => 32,
                None => 128,
            };
            bound.push((ip, prefix));
            break;
        }
    }

    Ok(bound)
}
