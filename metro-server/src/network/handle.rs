//! Shared access to the current network snapshot.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use super::error::LoadError;
use super::source::NetworkSource;
use super::{LoadReport, Network};

/// Thread-safe handle to the current network.
///
/// Readers take an `Arc<Network>` snapshot and keep it for the whole
/// request, so a concurrent reload never changes what they see. A reload
/// builds the new network outside the lock and swaps it in at the end.
#[derive(Clone)]
pub struct NetworkHandle {
    current: Arc<RwLock<Arc<Network>>>,
    source: Arc<NetworkSource>,
    /// Serializes reloads so generations stay strictly increasing.
    reload_lock: Arc<Mutex<()>>,
}

impl NetworkHandle {
    /// Load the initial network from `source`.
    ///
    /// Fails only if a source file cannot be read at all.
    pub fn load(source: NetworkSource) -> Result<(Self, LoadReport), LoadError> {
        let (network, report) = Network::load(&source, 0)?;
        Ok((Self::new(network, source), report))
    }

    /// Wrap an already-built network.
    pub fn new(network: Network, source: NetworkSource) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(network))),
            source: Arc::new(source),
            reload_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The current network snapshot.
    pub async fn snapshot(&self) -> Arc<Network> {
        let guard = self.current.read().await;
        guard.clone()
    }

    pub async fn generation(&self) -> u64 {
        self.snapshot().await.generation()
    }

    /// Re-read the source and replace the current network.
    ///
    /// On failure the existing network stays in place and the error is
    /// returned.
    pub async fn reload(&self) -> Result<LoadReport, LoadError> {
        let _serial = self.reload_lock.lock().await;
        let generation = self.generation().await + 1;

        let source = Arc::clone(&self.source);
        let loaded = tokio::task::spawn_blocking(move || Network::load(&source, generation))
            .await
            .map_err(|e| LoadError::Task(e.to_string()))?;

        let (network, report) = match loaded {
            Ok(built) => built,
            Err(e) => {
                warn!(error = %e, "reload failed, keeping current network");
                return Err(e);
            }
        };

        let mut guard = self.current.write().await;
        *guard = Arc::new(network);
        drop(guard);

        info!(generation, stations = report.stations, "network reloaded");
        Ok(report)
    }
}
