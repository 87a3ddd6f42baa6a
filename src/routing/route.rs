//! Resolved route descriptor.

use std::sync::Weak;

use serde::Serialize;

use crate::routing::error::RouteError;
use crate::routing::map::RouteLocation;
use crate::routing::resolver::{MatchKind, Resolution, Resolver};
use crate::routing::rewrite::{rewrite_path, ParamChange};
use crate::routing::segments::{IndexMap, Parameters, ParsedPath};

/// Result of resolving one URL.
///
/// Only [`RouteDescriptor::reroute`] changes it after construction, and then
/// only the name and location, together.
#[derive(Debug, Clone, Serialize)]
pub struct RouteDescriptor {
    name: String,
    location: RouteLocation,
    kind: MatchKind,
    path: String,
    segments: Vec<String>,
    arguments: Vec<String>,
    parameters: Parameters,
    map: IndexMap,
    #[serde(skip)]
    origin: Weak<Resolver>,
}

impl RouteDescriptor {
    pub(crate) fn from_parts(parsed: ParsedPath, resolution: Resolution, origin: Weak<Resolver>) -> Self {
        Self {
            name: resolution.name,
            location: resolution.location,
            kind: resolution.kind,
            path: parsed.path,
            segments: parsed.segments,
            arguments: resolution.arguments,
            parameters: parsed.parameters,
            map: parsed.index_map,
            origin,
        }
    }

    /// Dotted name of the matched route.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &RouteLocation {
        &self.location
    }

    pub fn kind(&self) -> MatchKind {
        self.kind
    }

    /// Path component of the resolved URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw non-empty path chunks, in request order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Decoded positional arguments left over after the route name.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Named parameters. Values are not percent-decoded.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Segment position of every named key.
    pub fn map(&self) -> &IndexMap {
        &self.map
    }

    /// Point this route at another route by name.
    ///
    /// The target is looked up directly in the route map of the resolver that
    /// produced this descriptor. Arguments and parameters are left as they are.
    pub fn reroute(&mut self, name: &str) -> Result<&mut Self, RouteError> {
        let resolver = self
            .origin
            .upgrade()
            .ok_or_else(|| RouteError::Detached(self.name.clone()))?;
        let location = resolver
            .lookup(name)
            .cloned()
            .ok_or_else(|| RouteError::RerouteTarget(name.to_string()))?;

        tracing::debug!(from = %self.name, to = name, "Rerouting");
        self.name = name.to_string();
        self.location = location;
        self.kind = MatchKind::Rerouted;
        Ok(self)
    }

    /// Rebuild this route's path with some named values changed.
    ///
    /// Keys that were in the original path are replaced in place; new keys
    /// are appended in the order given.
    pub fn rewrite_url<I, K>(&self, changes: I) -> String
    where
        I: IntoIterator<Item = (K, ParamChange)>,
        K: AsRef<str>,
    {
        rewrite_path(&self.segments, &self.map, changes)
    }
}
