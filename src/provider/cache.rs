//! TTL caching around another route map provider.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::observability::metrics;
use crate::provider::{ProviderError, RouteMapProvider};
use crate::routing::map::RouteMap;

/// Default lifetime of a cached route map.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CachedMap {
    routes: Arc<RouteMap>,
    expires_at: Instant,
}

/// Key/value store for cached route maps.
///
/// Cloning shares the store, so several providers (one per routes directory
/// or host) can live in the same cache.
#[derive(Debug, Clone, Default)]
pub struct RouteMapStore {
    entries: Arc<DashMap<String, CachedMap>>,
}

impl RouteMapStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serves the inner provider's map until it is `ttl` old.
#[derive(Debug, Clone)]
pub struct CachedRouteMapProvider {
    inner: Arc<dyn RouteMapProvider>,
    store: RouteMapStore,
    key: String,
    ttl: Duration,
}

impl CachedRouteMapProvider {
    /// Entries are keyed `{namespace}:route-map:{source}`.
    pub fn new(
        inner: Arc<dyn RouteMapProvider>,
        store: RouteMapStore,
        namespace: &str,
        ttl: Duration,
    ) -> Self {
        let key = format!("{namespace}:route-map:{}", inner.source());
        Self {
            inner,
            store,
            key,
            ttl,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Drop the cached map; the next request reloads it.
    pub fn invalidate(&self) {
        if self.store.entries.remove(&self.key).is_some() {
            tracing::debug!(key = %self.key, "Route map cache invalidated");
        }
    }

    fn fresh(&self, now: Instant) -> Option<Arc<RouteMap>> {
        let entry = self.store.entries.get(&self.key)?;
        (entry.expires_at > now).then(|| entry.routes.clone())
    }
}

impl RouteMapProvider for CachedRouteMapProvider {
    fn route_map(&self) -> Result<Arc<RouteMap>, ProviderError> {
        let now = Instant::now();
        if let Some(routes) = self.fresh(now) {
            metrics::record_cache_hit();
            return Ok(routes);
        }

        let routes = self.inner.route_map()?;
        self.store.entries.insert(
            self.key.clone(),
            CachedMap {
                routes: routes.clone(),
                expires_at: now + self.ttl,
            },
        );
        tracing::debug!(key = %self.key, ttl_secs = self.ttl.as_secs(), "Route map cached");
        Ok(routes)
    }

    fn source(&self) -> String {
        self.inner.source()
    }
}
