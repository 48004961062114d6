//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, RouteCache};
use crate::live::Broadcaster;
use crate::network::NetworkHandle;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Current network snapshot, swapped on reload
    pub network: NetworkHandle,

    /// Computed routes, keyed by network generation
    pub routes: Arc<RouteCache>,

    /// Live position relay
    pub broadcaster: Broadcaster,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: NetworkHandle, cache: &CacheConfig, broadcaster: Broadcaster) -> Self {
        Self {
            network,
            routes: Arc::new(RouteCache::new(cache)),
            broadcaster,
        }
    }
}
