//! Routes directory watcher for cache invalidation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::event::{EventKind, ModifyKind};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::provider::CachedRouteMapProvider;

/// Drops the cached route map whenever route files appear, disappear or move.
pub struct RoutesWatcher {
    path: PathBuf,
    cache: CachedRouteMapProvider,
}

impl RoutesWatcher {
    pub fn new(path: &Path, cache: CachedRouteMapProvider) -> Self {
        Self {
            path: path.to_path_buf(),
            cache,
        }
    }

    /// Start watching the routes tree in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let cache = self.cache.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if changes_route_map(&event.kind) {
                        tracing::info!(paths = ?event.paths, "Routes changed, invalidating route map");
                        cache.invalidate();
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::Recursive)?;

        tracing::info!(path = ?self.path, "Routes watcher started");
        Ok(watcher)
    }
}

/// Content edits keep route names intact; only the tree shape matters.
pub fn changes_route_map(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(_))
    )
}
