//! The reconcile loop.
//!
//! # Responsibilities
//! - Sample health, then presence, on every cycle
//! - Decide on that single snapshot and apply at most one mutation
//! - Sleep between cycles, stop on shutdown or after one cycle in one-shot mode
//!
//! # Design Decisions
//! - A cycle always runs to completion; shutdown is only observed while sleeping
//! - A failed presence read skips the mutation for that cycle
//! - A failed mutation is logged and retried implicitly by the next cycle

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::time;

use crate::health::{HealthProbe, HealthStatus};
use crate::reconcile::{decide, Action, ReconcileTarget, RunMode};
use crate::vip::{MutationOutcome, VipController, VipError, VipPresence};

/// How a cycle ended.
#[derive(Debug)]
pub enum CycleOutcome {
    /// Health and presence already agreed.
    Consistent,
    /// The mutation went through (or found the table already in shape).
    Mutated(MutationOutcome),
    /// The mutation was rejected; the next cycle will try again.
    MutationFailed(VipError),
    /// Presence could not be read, so nothing was decided.
    Skipped(VipError),
}

/// Everything observed and done in one cycle.
#[derive(Debug)]
pub struct CycleReport {
    pub health: HealthStatus,
    pub presence: Option<VipPresence>,
    pub action: Option<Action>,
    pub outcome: CycleOutcome,
}

/// Drives VIP presence towards service health.
pub struct Reconciler {
    target: ReconcileTarget,
    probe: Arc<dyn HealthProbe>,
    controller: Arc<dyn VipController>,
}

impl Reconciler {
    pub fn new(
        target: ReconcileTarget,
        probe: Arc<dyn HealthProbe>,
        controller: Arc<dyn VipController>,
    ) -> Self {
        Self {
            target,
            probe,
            controller,
        }
    }

    pub fn target(&self) -> &ReconcileTarget {
        &self.target
    }

    /// Run one probe → read → decide → act iteration.
    pub async fn run_cycle(&self) -> CycleReport {
        let ReconcileTarget {
            host,
            port,
            interface,
            vip,
            ..
        } = &self.target;

        let health = self.probe.probe(host, *port).await;
        tracing::info!(
            host = %host,
            port,
            health = %health,
            "Health check on {}:{} returned {}",
            host,
            port,
            health
        );

        let presence = match self.controller.is_present(interface, vip).await {
            Ok(presence) => presence,
            Err(e) => {
                tracing::error!(
                    vip = %vip,
                    interface = %interface,
                    error = %e,
                    "VIP check failed, skipping this cycle"
                );
                return CycleReport {
                    health,
                    presence: None,
                    action: None,
                    outcome: CycleOutcome::Skipped(e),
                };
            }
        };
        tracing::info!(
            vip = %vip,
            interface = %interface,
            presence = %presence,
            "VIP check for {} returned {}",
            vip,
            presence
        );

        let action = decide(health, presence);
        let result = match action {
            Action::NoOp => {
                tracing::info!("No action required");
                return CycleReport {
                    health,
                    presence: Some(presence),
                    action: Some(action),
                    outcome: CycleOutcome::Consistent,
                };
            }
            Action::AddVip => {
                tracing::info!(vip = %vip, interface = %interface, "Adding VIP {}", vip);
                self.controller.add(interface, vip).await
            }
            Action::RemoveVip => {
                tracing::info!(vip = %vip, interface = %interface, "Removing VIP {}", vip);
                self.controller.remove(interface, vip).await
            }
        };

        let outcome = match result {
            Ok(outcome) => {
                tracing::info!(vip = %vip, action = %action, ?outcome, "VIP change applied");
                CycleOutcome::Mutated(outcome)
            }
            Err(e) => {
                tracing::warn!(
                    vip = %vip,
                    interface = %interface,
                    action = %action,
                    error = %e,
                    "VIP change failed, will retry next cycle"
                );
                CycleOutcome::MutationFailed(e)
            }
        };

        CycleReport {
            health,
            presence: Some(presence),
            action: Some(action),
            outcome,
        }
    }

    /// Run cycles until the mode says stop. Returns the number of cycles run.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) -> u64 {
        let mode = self.target.mode();
        tracing::debug!(?mode, "Reconciler starting");

        let mut cycles = 0;
        let mut running = true;
        while running {
            self.run_cycle().await;
            cycles += 1;

            running = match mode {
                RunMode::Once => false,
                RunMode::Every(interval) => {
                    let seconds = interval.as_secs();
                    tracing::info!(seconds, "Sleeping {} seconds", seconds);
                    tokio::select! {
                        _ = time::sleep(interval) => true,
                        _ = shutdown.recv() => {
                            tracing::info!("Reconciler received shutdown signal, exiting loop");
                            false
                        }
                    }
                }
            };
        }

        tracing::debug!(cycles, "Reconciler stopped");
        cycles
    }
}
