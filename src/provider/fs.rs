//! Route discovery from a directory tree.
//!
//! `routes/alpha/beta/charley.php` becomes `alpha.beta.charley`; dots already
//! in a file name are kept (`demo.dump.php` becomes `demo.dump`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use jwalk::WalkDir;

use crate::observability::metrics;
use crate::provider::{ProviderError, RouteMapProvider};
use crate::routing::map::RouteMap;

/// Extensions accepted when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["php", "html"];

/// Scans a routes directory on every call.
#[derive(Debug, Clone)]
pub struct FsRouteMapProvider {
    root: PathBuf,
    extensions: Vec<String>,
}

impl FsRouteMapProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }

    /// Replace the accepted extensions. Earlier entries win when two files
    /// map to the same route name.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the routes directory and build the map.
    pub fn scan(&self) -> Result<RouteMap, ProviderError> {
        if self.root.as_os_str().is_empty() || !self.root.is_dir() {
            return Err(ProviderError::MissingDirectory(self.root.clone()));
        }

        let mut routes = RouteMap::new();
        let mut ranks: HashMap<String, usize> = HashMap::new();

        for entry in WalkDir::new(&self.root).sort(true).skip_hidden(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable routes entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Some(rank) = self.extension_rank(&path) else {
                continue;
            };
            let Some(name) = self.route_name(&path) else {
                tracing::warn!(path = %path.display(), "Skipping route file with a non UTF-8 name");
                continue;
            };

            if let Some(&existing) = ranks.get(&name) {
                if existing <= rank {
                    tracing::debug!(route = %name, path = %path.display(), "Route shadowed by another extension");
                    continue;
                }
            }
            ranks.insert(name.clone(), rank);
            routes.insert(name, path);
        }

        Ok(routes)
    }

    /// Dotted route name for a file under the root.
    pub fn route_name(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let stem = relative.file_stem()?.to_str()?;

        let mut parts = Vec::new();
        if let Some(parent) = relative.parent() {
            for component in parent.components() {
                parts.push(component.as_os_str().to_str()?);
            }
        }
        parts.push(stem);
        Some(parts.join("."))
    }

    fn extension_rank(&self, path: &Path) -> Option<usize> {
        let extension = path.extension()?.to_str()?;
        self.extensions.iter().position(|accepted| accepted == extension)
    }
}

impl RouteMapProvider for FsRouteMapProvider {
    fn route_map(&self) -> Result<Arc<RouteMap>, ProviderError> {
        let routes = self.scan()?;
        metrics::record_route_map_load(routes.len());
        tracing::info!(root = %self.root.display(), routes = routes.len(), "Route map loaded");
        Ok(Arc::new(routes))
    }

    fn source(&self) -> String {
        self.root.display().to_string()
    }
}
