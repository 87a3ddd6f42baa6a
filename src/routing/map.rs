//! Route map: dotted route name to handler location.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Location of a route handler.
///
/// Opaque to the resolver; providers fill it with the handler file path and
/// executors decide what to do with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RouteLocation(PathBuf);

impl RouteLocation {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RouteLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<&str> for RouteLocation {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for RouteLocation {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

/// Read-only mapping from dotted route name (`alpha.beta.charley`) to location.
///
/// Built once by a provider and shared as `Arc<RouteMap>`; resolution only
/// queries it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteMap {
    routes: BTreeMap<String, RouteLocation>,
}

impl RouteMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single route, replacing any previous location for `name`.
    pub fn insert(&mut self, name: impl Into<String>, location: impl Into<RouteLocation>) -> &mut Self {
        self.routes.insert(name.into(), location.into());
        self
    }

    /// Builder-style variant of [`RouteMap::insert`].
    pub fn with_route(mut self, name: impl Into<String>, location: impl Into<RouteLocation>) -> Self {
        self.insert(name, location);
        self
    }

    pub fn get(&self, name: &str) -> Option<&RouteLocation> {
        self.routes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteLocation)> {
        self.routes.iter().map(|(name, location)| (name.as_str(), location))
    }
}

impl<N, L> FromIterator<(N, L)> for RouteMap
where
    N: Into<String>,
    L: Into<RouteLocation>,
{
    fn from_iter<I: IntoIterator<Item = (N, L)>>(iter: I) -> Self {
        let mut map = RouteMap::new();
        for (name, location) in iter {
            map.insert(name, location);
        }
        map
    }
}
