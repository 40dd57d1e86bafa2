//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use lobalancer::health::{HealthProbe, HealthStatus};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A local service that accepts and immediately drops connections.
#[allow(dead_code)]
pub struct MockService {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

#[allow(dead_code)]
impl MockService {
    /// Start on an ephemeral port.
    pub async fn start() -> Self {
        Self::start_on("127.0.0.1:0".parse().unwrap()).await
    }

    /// Start on a specific address.
    pub async fn start_on(addr: SocketAddr) -> Self {
        let listener = TcpListener::bind(addr).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                drop(socket);
            }
        });

        Self { addr, handle }
    }

    /// Stop accepting and release the port.
    pub async fn stop(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }
}

/// A loopback port with nothing listening on it.
#[allow(dead_code)]
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

/// A probe whose answer the test flips by hand.
#[allow(dead_code)]
pub struct SwitchProbe {
    up: AtomicBool,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl SwitchProbe {
    pub fn new(status: HealthStatus) -> Self {
        Self {
            up: AtomicBool::new(status.is_up()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set(&self, status: HealthStatus) {
        self.up.store(status.is_up(), Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HealthProbe for SwitchProbe {
    async fn probe(&self, _host: &str, _port: u16) -> HealthStatus {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.up.load(Ordering::SeqCst).into()
    }
}
