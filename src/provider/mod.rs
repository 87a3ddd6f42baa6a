//! Route map providers.
//!
//! # Data Flow
//! ```text
//! Router asks for the current map
//!     → cache.rs (fresh entry in the shared store? hand it out)
//!     → fs.rs (scan the routes directory, build RouteMap)
//!     → Arc<RouteMap> snapshot back to the router
//! ```
//!
//! # Design Decisions
//! - Providers compose: the cache wraps any other provider
//! - Every provider returns an immutable `Arc<RouteMap>`
//! - `source()` identifies the underlying data for cache keys

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::routing::map::RouteMap;

pub mod cache;
pub mod fs;

pub use cache::{CachedRouteMapProvider, RouteMapStore};
pub use fs::FsRouteMapProvider;

/// Errors raised while building a route map.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("routes directory does not exist or is undefined: `{0}`")]
    MissingDirectory(PathBuf),
}

/// Source of route map snapshots.
pub trait RouteMapProvider: Send + Sync + fmt::Debug {
    /// Current route map.
    fn route_map(&self) -> Result<Arc<RouteMap>, ProviderError>;

    /// Identity of the data behind this provider.
    fn source(&self) -> String {
        "memory".to_string()
    }
}

/// Serves one prebuilt map.
#[derive(Debug, Clone, Default)]
pub struct StaticRouteMapProvider {
    routes: Arc<RouteMap>,
}

impl StaticRouteMapProvider {
    pub fn new(routes: RouteMap) -> Self {
        Self {
            routes: Arc::new(routes),
        }
    }
}

impl RouteMapProvider for StaticRouteMapProvider {
    fn route_map(&self) -> Result<Arc<RouteMap>, ProviderError> {
        Ok(self.routes.clone())
    }
}
