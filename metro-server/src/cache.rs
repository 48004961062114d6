//! Caching layer for computed routes.
//!
//! Routes are pure functions of the network snapshot and the two
//! stations, so they can be cached until the network changes. Keys carry
//! the snapshot generation; after a reload old entries are never hit and
//! age out through the TTL.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::StationId;
use crate::network::Network;
use crate::planner::{Route, RouteError, Router};

/// Cache key for routes: (network generation, origin, destination).
type RouteKey = (u64, StationId, StationId);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 10_000,
        }
    }
}

/// Cache of routes keyed by snapshot generation and station pair.
pub struct RouteCache {
    routes: MokaCache<RouteKey, Arc<Route>>,
}

impl RouteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        Self { routes }
    }

    /// Route between two names, using the cache when possible.
    ///
    /// Name resolution and errors are never cached.
    pub async fn route(
        &self,
        network: &Network,
        origin: &str,
        destination: &str,
    ) -> Result<Arc<Route>, RouteError> {
        let router = Router::new(network);
        let origin = router.resolve(origin)?;
        let destination = router.resolve(destination)?;

        let key = (network.generation(), origin, destination);
        if let Some(route) = self.routes.get(&key).await {
            trace!(%origin, %destination, "route cache hit");
            return Ok(route);
        }

        let route = Arc::new(router.route_ids(origin, destination)?);
        self.routes.insert(key, Arc::clone(&route)).await;
        Ok(route)
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
    }

    /// Apply pending inserts and evictions so `entry_count` is current.
    pub async fn run_pending_tasks(&self) {
        self.routes.run_pending_tasks().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkSource;

    fn builtin(generation: u64) -> Network {
        Network::load(&NetworkSource::builtin(), generation).unwrap().0
    }

    #[tokio::test]
    async fn cached_route_is_shared() {
        let cache = RouteCache::new(&CacheConfig::default());
        let network = builtin(0);

        let first = cache.route(&network, "Kajang", "Merdeka").await.unwrap();
        let second = cache.route(&network, "kajang", "MERDEKA").await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn new_generation_misses() {
        let cache = RouteCache::new(&CacheConfig::default());
        let old = builtin(0);
        let new = builtin(1);

        let first = cache.route(&old, "Kajang", "Merdeka").await.unwrap();
        let second = cache.route(&new, "Kajang", "Merdeka").await.unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.path, second.path);
    }

    #[tokio::test]
    async fn errors_not_cached() {
        let cache = RouteCache::new(&CacheConfig::default());
        let network = builtin(0);

        let err = cache.route(&network, "Kajang", "Atlantis").await.unwrap_err();
        assert_eq!(err, RouteError::UnknownStation("Atlantis".to_string()));
        cache.routes.run_pending_tasks().await;
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.max_capacity, 10_000);
    }
}
