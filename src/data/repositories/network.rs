//! Network reachability.
//!
//! `NetworkRepository` holds a `Signal<bool>` that only the monitor task
//! writes to. Values are published on change only, so every update an
//! observer receives is a transition.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use tokio::net::TcpStream;
use tokio::time::MissedTickBehavior;

use crate::core::scope::TaskScope;
use crate::core::signal::{Observer, Signal};

/// Answers "can we reach the internet right now?".
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    fn describe(&self) -> String;

    async fn is_reachable(&self) -> bool;
}

/// Reachability by opening a TCP connection to a well-known address.
pub struct TcpProbe {
    address: String,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(address: impl Into<String>, timeout: Duration) -> Self {
        Self {
            address: address.into(),
            timeout,
        }
    }
}

#[async_trait]
impl ReachabilityProbe for TcpProbe {
    fn describe(&self) -> String {
        format!("tcp://{}", self.address)
    }

    async fn is_reachable(&self) -> bool {
        match tokio::time::timeout(self.timeout, TcpStream::connect(self.address.as_str())).await {
            Ok(Ok(_stream)) => true,
            Ok(Err(e)) => {
                debug!("Probe {} failed: {}", self.address, e);
                false
            }
            Err(_) => {
                debug!("Probe {} timed out after {:?}", self.address, self.timeout);
                false
            }
        }
    }
}

pub struct NetworkRepository {
    status: Signal<bool>,
}

impl Default for NetworkRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkRepository {
    /// Starts out unreachable until the first probe reports otherwise.
    pub fn new() -> Self {
        Self {
            status: Signal::new(false),
        }
    }

    pub fn network_status(&self) -> Observer<bool> {
        self.status.subscribe()
    }

    pub fn is_available(&self) -> bool {
        self.status.get()
    }

    /// Record a reachability observation. Returns true if it was a transition.
    pub fn report(&self, available: bool) -> bool {
        let changed = self.status.publish_if_changed(available);
        if changed {
            info!(
                "Network is now {}",
                if available { "available" } else { "unavailable" }
            );
        }
        changed
    }

    /// Probe reachability every `interval` for the lifetime of `scope`.
    /// The first probe runs immediately.
    pub fn spawn_monitor(
        self: &Arc<Self>,
        scope: &mut TaskScope,
        probe: Arc<dyn ReachabilityProbe>,
        interval: Duration,
    ) {
        info!(
            "Starting network monitor: probe={}, interval={:?}",
            probe.describe(),
            interval
        );
        let repository = Arc::clone(self);
        scope.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let available = probe.is_reachable().await;
                repository.report(available);
            }
        });
    }
}
