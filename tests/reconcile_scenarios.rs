//! End-to-end reconcile cycles against the in-memory controller.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use lobalancer::health::{HealthStatus, TcpProbe};
use lobalancer::lifecycle::Shutdown;
use lobalancer::reconcile::{Action, CycleOutcome, ReconcileTarget, Reconciler};
use lobalancer::vip::{
    ControllerCall, MemoryController, MutationOutcome, VipAddress, VipController, VipPresence,
};

mod common;

use common::SwitchProbe;

fn vip() -> VipAddress {
    "10.0.0.5".parse().unwrap()
}

fn target(port: u16, interval: Duration) -> ReconcileTarget {
    ReconcileTarget {
        host: "127.0.0.1".into(),
        port,
        interface: "lo".into(),
        vip: vip(),
        interval,
    }
}

fn add_call() -> ControllerCall {
    ControllerCall::Add {
        interface: "lo".into(),
        vip: vip(),
    }
}

fn remove_call() -> ControllerCall {
    ControllerCall::Remove {
        interface: "lo".into(),
        vip: vip(),
    }
}

#[tokio::test]
async fn test_service_comes_up_then_goes_down() {
    let port = common::closed_port().await;
    let controller = Arc::new(MemoryController::with_interface("lo"));
    let reconciler = Reconciler::new(
        target(port, Duration::ZERO),
        Arc::new(TcpProbe::new(Duration::from_secs(2))),
        controller.clone(),
    );

    // Port closed, VIP absent: nothing to do.
    let report = reconciler.run_cycle().await;
    assert_eq!(report.health, HealthStatus::Down);
    assert_eq!(report.presence, Some(VipPresence::Absent));
    assert_eq!(report.action, Some(Action::NoOp));
    assert!(controller.mutations().is_empty());

    // Port open, VIP absent: add once.
    let addr: SocketAddr = format!("127.0.0.1:{}", port).parse().unwrap();
    let service = common::MockService::start_on(addr).await;
    let report = reconciler.run_cycle().await;
    assert_eq!(report.action, Some(Action::AddVip));
    assert!(matches!(report.outcome, CycleOutcome::Mutated(MutationOutcome::Applied)));
    assert_eq!(controller.mutations(), vec![add_call()]);
    assert!(controller.contains("lo", &vip()));

    // Port closed again, VIP present: remove once.
    service.stop().await;
    let report = reconciler.run_cycle().await;
    assert_eq!(report.action, Some(Action::RemoveVip));
    assert_eq!(controller.mutations(), vec![add_call(), remove_call()]);
    assert!(!controller.contains("lo", &vip()));
}

#[tokio::test]
async fn test_health_is_sampled_before_presence() {
    let probe = Arc::new(SwitchProbe::new(HealthStatus::Up));
    let controller = Arc::new(MemoryController::with_interface("lo"));
    let reconciler = Reconciler::new(target(80, Duration::ZERO), probe.clone(), controller.clone());

    reconciler.run_cycle().await;

    assert_eq!(probe.calls(), 1);
    assert_eq!(
        controller.calls(),
        vec![
            ControllerCall::IsPresent {
                interface: "lo".into(),
                vip: vip(),
            },
            add_call(),
        ]
    );
}

#[tokio::test]
async fn test_converges_from_every_starting_point() {
    for health in [HealthStatus::Up, HealthStatus::Down] {
        for present in [true, false] {
            let controller = Arc::new(MemoryController::with_interface("lo"));
            if present {
                controller.bind("lo", &vip());
            }
            let reconciler = Reconciler::new(
                target(80, Duration::ZERO),
                Arc::new(SwitchProbe::new(health)),
                controller.clone(),
            );

            reconciler.run_cycle().await;

            assert_eq!(
                controller.contains("lo", &vip()),
                health.is_up(),
                "health {health}, initially present {present}"
            );
        }
    }
}

#[tokio::test]
async fn test_self_heals_external_changes() {
    let probe = Arc::new(SwitchProbe::new(HealthStatus::Up));
    let controller = Arc::new(MemoryController::with_interface("lo"));
    let reconciler = Reconciler::new(target(80, Duration::ZERO), probe.clone(), controller.clone());

    reconciler.run_cycle().await;
    assert!(controller.contains("lo", &vip()));

    // Someone else removes it while healthy.
    controller.unbind("lo", &vip());
    assert_eq!(reconciler.run_cycle().await.action, Some(Action::AddVip));
    assert!(controller.contains("lo", &vip()));

    // Someone else adds it while unhealthy.
    probe.set(HealthStatus::Down);
    reconciler.run_cycle().await;
    controller.bind("lo", &vip());
    assert_eq!(reconciler.run_cycle().await.action, Some(Action::RemoveVip));
    assert!(!controller.contains("lo", &vip()));
}

#[tokio::test]
async fn test_redundant_mutations_leave_presence_unchanged() {
    let controller = MemoryController::with_interface("lo");
    controller.bind("lo", &vip());

    assert_eq!(controller.add("lo", &vip()).await.unwrap(), MutationOutcome::AlreadyInState);
    assert_eq!(controller.is_present("lo", &vip()).await.unwrap(), VipPresence::Present);

    controller.unbind("lo", &vip());
    assert_eq!(controller.remove("lo", &vip()).await.unwrap(), MutationOutcome::AlreadyInState);
    assert_eq!(controller.is_present("lo", &vip()).await.unwrap(), VipPresence::Absent);
}

#[tokio::test]
async fn test_presence_failure_skips_mutation() {
    let controller = Arc::new(MemoryController::with_interface("lo"));
    controller.fail_presence(Some("netlink unavailable"));
    let reconciler = Reconciler::new(
        target(80, Duration::ZERO),
        Arc::new(SwitchProbe::new(HealthStatus::Up)),
        controller.clone(),
    );

    let report = reconciler.run_cycle().await;
    assert_eq!(report.presence, None);
    assert_eq!(report.action, None);
    assert!(matches!(report.outcome, CycleOutcome::Skipped(_)));
    assert!(controller.mutations().is_empty());

    controller.fail_presence(None);
    reconciler.run_cycle().await;
    assert!(controller.contains("lo", &vip()));
}

#[tokio::test]
async fn test_missing_interface_skips_cycle() {
    let controller = Arc::new(MemoryController::with_interface("eth0"));
    let reconciler = Reconciler::new(
        target(80, Duration::ZERO),
        Arc::new(SwitchProbe::new(HealthStatus::Up)),
        controller.clone(),
    );

    assert!(matches!(reconciler.run_cycle().await.outcome, CycleOutcome::Skipped(_)));
    assert!(controller.mutations().is_empty());
}

#[tokio::test]
async fn test_mutation_failure_is_retried_next_cycle() {
    let controller = Arc::new(MemoryController::with_interface("lo"));
    controller.fail_mutations(Some("Operation not permitted"));
    let reconciler = Reconciler::new(
        target(80, Duration::ZERO),
        Arc::new(SwitchProbe::new(HealthStatus::Up)),
        controller.clone(),
    );

    let report = reconciler.run_cycle().await;
    assert_eq!(report.action, Some(Action::AddVip));
    assert!(matches!(report.outcome, CycleOutcome::MutationFailed(_)));
    assert!(!controller.contains("lo", &vip()));

    controller.fail_mutations(None);
    let report = reconciler.run_cycle().await;
    assert_eq!(report.action, Some(Action::AddVip));
    assert!(controller.contains("lo", &vip()));
    assert_eq!(controller.mutations(), vec![add_call(), add_call()]);
}

#[tokio::test]
async fn test_one_shot_runs_exactly_one_cycle() {
    for health in [HealthStatus::Up, HealthStatus::Down] {
        let probe = Arc::new(SwitchProbe::new(health));
        let controller = Arc::new(MemoryController::with_interface("lo"));
        let reconciler =
            Reconciler::new(target(80, Duration::ZERO), probe.clone(), controller.clone());
        let shutdown = Shutdown::new();

        let cycles = reconciler.run(shutdown.subscribe()).await;

        assert_eq!(cycles, 1);
        assert_eq!(probe.calls(), 1);
    }
}

#[tokio::test(start_paused = true)]
async fn test_continuous_mode_cycles_until_shutdown() {
    let probe = Arc::new(SwitchProbe::new(HealthStatus::Down));
    let controller = Arc::new(MemoryController::with_interface("lo"));
    let reconciler = Reconciler::new(
        target(80, Duration::from_secs(5)),
        probe.clone(),
        controller.clone(),
    );
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    let handle = tokio::spawn(async move { reconciler.run(rx).await });

    // Cycles at t=0, 5 and 10; shutdown lands during the third sleep.
    tokio::time::sleep(Duration::from_secs(12)).await;
    shutdown.trigger();

    let cycles = handle.await.unwrap();
    assert_eq!(cycles, 3);
    assert_eq!(probe.calls(), 3);
    assert!(controller.mutations().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_down_is_not_terminal() {
    let probe = Arc::new(SwitchProbe::new(HealthStatus::Down));
    let controller = Arc::new(MemoryController::with_interface("lo"));
    let reconciler = Reconciler::new(
        target(80, Duration::from_secs(1)),
        probe.clone(),
        controller.clone(),
    );
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    let handle = tokio::spawn(async move { reconciler.run(rx).await });

    tokio::time::sleep(Duration::from_millis(3500)).await;
    probe.set(HealthStatus::Up);
    tokio::time::sleep(Duration::from_secs(1)).await;
    shutdown.trigger();

    handle.await.unwrap();
    assert!(controller.contains("lo", &vip()));
}
