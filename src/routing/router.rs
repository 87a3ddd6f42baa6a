//! Route lookup entry point.
//!
//! # Responsibilities
//! - Bind resolver settings to a route map provider
//! - Keep the current resolver snapshot and swap it when the map changes
//! - Surface a missing route map as a configuration error
//!
//! # Design Decisions
//! - Snapshot swap via `ArcSwapOption`, no locks on the lookup path
//! - A reloaded map with identical contents keeps the existing snapshot, so
//!   outstanding descriptors can still reroute

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;

use crate::config::{ResolverConfig, RouterConfig};
use crate::provider::{CachedRouteMapProvider, FsRouteMapProvider, RouteMapProvider, RouteMapStore};
use crate::routing::error::RouteError;
use crate::routing::resolver::Resolver;
use crate::routing::route::RouteDescriptor;

/// Resolves URLs against whatever map the provider currently hands out.
pub struct Router {
    config: ResolverConfig,
    provider: Arc<dyn RouteMapProvider>,
    cache: Option<CachedRouteMapProvider>,
    current: ArcSwapOption<Resolver>,
}

impl Router {
    pub fn new(config: ResolverConfig, provider: Arc<dyn RouteMapProvider>) -> Self {
        Self {
            config,
            provider,
            cache: None,
            current: ArcSwapOption::empty(),
        }
    }

    /// Build a router that scans `routes.path`, cached when `cache.enabled`.
    pub fn from_config(config: &RouterConfig) -> Self {
        let scanner: Arc<dyn RouteMapProvider> = Arc::new(
            FsRouteMapProvider::new(config.routes.path.clone())
                .with_extensions(config.routes.extensions.iter().cloned()),
        );

        if !config.cache.enabled {
            return Self::new(config.resolver.clone(), scanner);
        }

        let cache = CachedRouteMapProvider::new(
            scanner,
            RouteMapStore::new(),
            &config.cache.namespace,
            Duration::from_secs(config.cache.ttl_secs),
        );
        Self {
            cache: Some(cache.clone()),
            ..Self::new(config.resolver.clone(), Arc::new(cache))
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The caching layer, when this router was built with one.
    pub fn cache(&self) -> Option<&CachedRouteMapProvider> {
        self.cache.as_ref()
    }

    /// Current resolver, rebuilt if the provider returned a different map.
    pub fn resolver(&self) -> Result<Arc<Resolver>, RouteError> {
        let routes = self.provider.route_map()?;

        if let Some(current) = self.current.load_full() {
            if Arc::ptr_eq(current.routes(), &routes) || **current.routes() == *routes {
                return Ok(current);
            }
        }

        let resolver = Arc::new(Resolver::new(self.config.clone(), routes));
        self.current.store(Some(resolver.clone()));
        tracing::debug!(routes = resolver.routes().len(), "Resolver snapshot replaced");
        Ok(resolver)
    }

    pub fn resolve(&self, url: &str) -> Result<RouteDescriptor, RouteError> {
        self.resolver()?.resolve(url)
    }
}
