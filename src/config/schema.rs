//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::dispatch::DEFAULT_MAX_REROUTES;
use crate::provider::fs::DEFAULT_EXTENSIONS;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RouterConfig {
    /// Where route files live.
    pub routes: RoutesConfig,

    /// Route name resolution settings.
    pub resolver: ResolverConfig,

    /// Route map caching.
    pub cache: CacheConfig,

    /// Handler dispatch settings.
    pub dispatch: DispatchConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Route file discovery.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RoutesConfig {
    /// Root of the routes directory tree.
    pub path: PathBuf,

    /// Accepted file extensions, without the dot. Earlier entries win when
    /// two files share a route name.
    pub extensions: Vec<String>,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("routes"),
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

/// Settings fixed for the lifetime of a resolver.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResolverConfig {
    /// Route used for an empty path.
    pub index_route: String,

    /// Route used when no prefix of the path matches.
    pub catchall_route: String,

    /// Route used when nothing matches and there is no catch-all.
    pub notfound_route: String,

    /// Record bare segments as keyless named parameters.
    pub pair_all_segments: bool,

    /// Drop residual arguments that are also named parameter keys.
    pub filter_paired_arguments: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            index_route: "index".to_string(),
            catchall_route: "_catchall".to_string(),
            notfound_route: "404".to_string(),
            pair_all_segments: true,
            filter_paired_arguments: false,
        }
    }
}

/// Route map cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache scanned route maps.
    pub enabled: bool,

    /// Seconds a cached map stays fresh.
    pub ttl_secs: u64,

    /// Cache key prefix, usually the host name.
    pub namespace: String,

    /// Invalidate the cache when route files are added, removed or renamed.
    pub watch: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 60,
            namespace: "localhost".to_string(),
            watch: false,
        }
    }
}

/// Dispatch configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DispatchConfig {
    /// Maximum reroutes followed for one request.
    pub max_reroutes: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_reroutes: DEFAULT_MAX_REROUTES,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Log line format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "deep_router=info".to_string(),
            log_format: LogFormat::Full,
        }
    }
}
