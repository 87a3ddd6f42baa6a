//! Routing error types.

use thiserror::Error;

use crate::provider::ProviderError;

/// Errors surfaced by resolution and reroute.
///
/// A resolution miss is never an error by itself: the resolver falls back to
/// the catch-all and not-found routes first. Only an exhausted fallback chain
/// reaches the caller.
#[derive(Debug, Error)]
pub enum RouteError {
    /// No route map is configured, or the provider failed to build one.
    #[error("route map unavailable")]
    RouteMap(#[from] ProviderError),

    /// Nothing matched and neither fallback route exists.
    #[error("could not find a route: neither `{catchall}` nor `{notfound}` is defined")]
    NoFallback { catchall: String, notfound: String },

    /// Explicit reroute target is not in the route map.
    #[error("route could not be found: {0}")]
    RerouteTarget(String),

    /// The resolver that produced this route has been dropped.
    #[error("route `{0}` is detached from its resolver")]
    Detached(String),
}

impl RouteError {
    /// True for errors caused by missing or incomplete router setup.
    pub fn is_configuration(&self) -> bool {
        matches!(self, RouteError::RouteMap(_) | RouteError::NoFallback { .. })
    }
}
