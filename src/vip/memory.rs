//! In-memory controller.
//!
//! Keeps an address table per interface and records every call, so the
//! reconcile loop can be driven without touching the host's network stack.
//! Tests also use it to play the "external actor" that adds or removes the
//! VIP behind the loop's back.

use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::vip::{MutationOutcome, VipAddress, VipController, VipError, VipPresence};

/// A call made against the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerCall {
    IsPresent { interface: String, vip: VipAddress },
    Add { interface: String, vip: VipAddress },
    Remove { interface: String, vip: VipAddress },
}

#[derive(Debug, Default)]
struct Table {
    interfaces: HashMap<String, HashSet<IpAddr>>,
    calls: Vec<ControllerCall>,
    presence_failure: Option<String>,
    mutation_failure: Option<String>,
}

/// Address table held in memory.
#[derive(Debug, Default)]
pub struct MemoryController {
    table: Mutex<Table>,
}

impl MemoryController {
    /// Create a controller that knows a single, empty interface.
    pub fn with_interface(interface: &str) -> Self {
        let controller = Self::default();
        controller.lock().interfaces.insert(interface.to_string(), HashSet::new());
        controller
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Table> {
        self.table.lock().expect("memory controller mutex poisoned")
    }

    /// Bind an address directly, bypassing call recording.
    pub fn bind(&self, interface: &str, vip: &VipAddress) {
        self.lock()
            .interfaces
            .entry(interface.to_string())
            .or_default()
            .insert(vip.ip());
    }

    /// Unbind an address directly, bypassing call recording.
    pub fn unbind(&self, interface: &str, vip: &VipAddress) {
        if let Some(addrs) = self.lock().interfaces.get_mut(interface) {
            addrs.remove(&vip.ip());
        }
    }

    pub fn contains(&self, interface: &str, vip: &VipAddress) -> bool {
        self.lock()
            .interfaces
            .get(interface)
            .is_some_and(|addrs| addrs.contains(&vip.ip()))
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<ControllerCall> {
        self.lock().calls.clone()
    }

    /// Only the `add`/`remove` calls.
    pub fn mutations(&self) -> Vec<ControllerCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, ControllerCall::IsPresent { .. }))
            .collect()
    }

    /// Make presence queries fail with `reason` until cleared with `None`.
    pub fn fail_presence(&self, reason: Option<&str>) {
        self.lock().presence_failure = reason.map(str::to_string);
    }

    /// Make `add`/`remove` fail with `reason` until cleared with `None`.
    pub fn fail_mutations(&self, reason: Option<&str>) {
        self.lock().mutation_failure = reason.map(str::to_string);
    }
}

#[async_trait]
impl VipController for MemoryController {
    async fn is_present(&self, interface: &str, vip: &VipAddress) -> Result<VipPresence, VipError> {
        let mut table = self.lock();
        table.calls.push(ControllerCall::IsPresent {
            interface: interface.to_string(),
            vip: *vip,
        });
        if let Some(reason) = &table.presence_failure {
            return Err(VipError::Rejected(reason.clone()));
        }
        let addrs = table
            .interfaces
            .get(interface)
            .ok_or_else(|| VipError::InterfaceNotFound(interface.to_string()))?;
        Ok(addrs.contains(&vip.ip()).into())
    }

    async fn add(&self, interface: &str, vip: &VipAddress) -> Result<MutationOutcome, VipError> {
        let mut table = self.lock();
        table.calls.push(ControllerCall::Add {
            interface: interface.to_string(),
            vip: *vip,
        });
        if let Some(reason) = &table.mutation_failure {
            return Err(VipError::Rejected(reason.clone()));
        }
        let addrs = table
            .interfaces
            .get_mut(interface)
            .ok_or_else(|| VipError::InterfaceNotFound(interface.to_string()))?;
        Ok(if addrs.insert(vip.ip()) {
            MutationOutcome::Applied
        } else {
            MutationOutcome::AlreadyInState
        })
    }

    async fn remove(&self, interface: &str, vip: &VipAddress) -> Result<MutationOutcome, VipError> {
        let mut table = self.lock();
        table.calls.push(ControllerCall::Remove {
            interface: interface.to_string(),
            vip: *vip,
        });
        if let Some(reason) = &table.mutation_failure {
            return Err(VipError::Rejected(reason.clone()));
        }
        let addrs = table
            .interfaces
            .get_mut(interface)
            .ok_or_else(|| VipError::InterfaceNotFound(interface.to_string()))?;
        Ok(if addrs.remove(&vip.ip()) {
            MutationOutcome::Applied
        } else {
            MutationOutcome::AlreadyInState
        })
    }
}
