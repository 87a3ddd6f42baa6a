//! Longest dotted-prefix route resolution.
//!
//! # Responsibilities
//! - Turn parsed segments into candidate dotted names, longest first
//! - Fall back to the catch-all, then the not-found route
//! - Split off the residual positional arguments and decode them
//!
//! # Design Decisions
//! - Bound to one immutable `RouteMap` snapshot; a new map means a new resolver
//! - The candidate names share one buffer that is only ever truncated
//! - A miss is an `Option`, never an error, until the fallbacks run out

use std::sync::Arc;

use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::config::ResolverConfig;
use crate::observability::metrics;
use crate::routing::error::RouteError;
use crate::routing::map::{RouteLocation, RouteMap};
use crate::routing::route::RouteDescriptor;
use crate::routing::segments::parse_segments;

/// Which tier of the lookup produced a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// A prefix of the request path named a route.
    Exact,
    /// Nothing matched; the catch-all route took the request.
    CatchAll,
    /// Nothing matched and there is no catch-all; the not-found route took it.
    NotFound,
    /// Replaced by an explicit reroute.
    Rerouted,
}

impl MatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchKind::Exact => "matched",
            MatchKind::CatchAll => "catchall",
            MatchKind::NotFound => "notfound",
            MatchKind::Rerouted => "rerouted",
        }
    }
}

/// Outcome of the name search, before it is wrapped in a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Resolution {
    pub kind: MatchKind,
    pub name: String,
    pub location: RouteLocation,
    pub arguments: Vec<String>,
}

/// Resolves request paths against one route map snapshot.
#[derive(Debug)]
pub struct Resolver {
    config: ResolverConfig,
    routes: Arc<RouteMap>,
}

impl Resolver {
    pub fn new(config: ResolverConfig, routes: Arc<RouteMap>) -> Self {
        Self { config, routes }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn routes(&self) -> &Arc<RouteMap> {
        &self.routes
    }

    /// Direct lookup by dotted name, bypassing segment matching.
    pub fn lookup(&self, name: &str) -> Option<&RouteLocation> {
        self.routes.get(name)
    }

    /// Resolve `url` to a route.
    ///
    /// The returned descriptor keeps a weak reference to this resolver so that
    /// it can be rerouted later.
    pub fn resolve(self: &Arc<Self>, url: &str) -> Result<RouteDescriptor, RouteError> {
        let parsed = parse_segments(url, self.config.pair_all_segments);

        let resolution = match self.search(&parsed.indexed) {
            Ok(resolution) => resolution,
            Err(e) => {
                metrics::record_resolution("failed");
                tracing::warn!(path = %parsed.path, error = %e, "Route resolution failed");
                return Err(e);
            }
        };

        let mut arguments = resolution.arguments;
        if self.config.filter_paired_arguments {
            arguments.retain(|argument| !parsed.parameters.contains_key(argument));
        }
        let arguments = arguments.iter().map(|argument| decode_argument(argument)).collect();

        metrics::record_resolution(resolution.kind.as_str());
        tracing::debug!(
            path = %parsed.path,
            route = %resolution.name,
            kind = resolution.kind.as_str(),
            "Route resolved"
        );

        Ok(RouteDescriptor::from_parts(
            parsed,
            Resolution {
                arguments,
                ..resolution
            },
            Arc::downgrade(self),
        ))
    }

    /// Three-tier search: longest prefix, then catch-all, then not-found.
    pub(crate) fn search(&self, indexed: &[String]) -> Result<Resolution, RouteError> {
        let candidates = self.candidates(indexed);

        if let Some((name, location, matched)) = self.longest_match(&candidates) {
            return Ok(Resolution {
                kind: MatchKind::Exact,
                name,
                location,
                arguments: to_owned(&candidates[matched..]),
            });
        }

        // Fallbacks see every indexed segment, empty keys included.
        let arguments = if is_index_request(indexed) {
            vec![self.config.index_route.clone()]
        } else {
            indexed.to_vec()
        };

        let fallbacks = [
            (MatchKind::CatchAll, &self.config.catchall_route),
            (MatchKind::NotFound, &self.config.notfound_route),
        ];
        fallbacks
            .into_iter()
            .find_map(|(kind, name)| {
                self.routes.get(name).map(|location| Resolution {
                    kind,
                    name: name.clone(),
                    location: location.clone(),
                    arguments: arguments.clone(),
                })
            })
            .ok_or_else(|| RouteError::NoFallback {
                catchall: self.config.catchall_route.clone(),
                notfound: self.config.notfound_route.clone(),
            })
    }

    /// Non-empty keys, or the index route when nothing meaningful is left.
    fn candidates<'a>(&'a self, indexed: &'a [String]) -> Vec<&'a str> {
        if is_index_request(indexed) {
            return vec![self.config.index_route.as_str()];
        }
        indexed
            .iter()
            .map(String::as_str)
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    /// Longest prefix of `candidates` whose dotted name is a known route.
    ///
    /// Returns the name, its location and the number of segments consumed.
    fn longest_match(&self, candidates: &[&str]) -> Option<(String, RouteLocation, usize)> {
        let mut name = String::with_capacity(candidates.iter().map(|s| s.len() + 1).sum());
        let mut ends = Vec::with_capacity(candidates.len());
        for (i, segment) in candidates.iter().enumerate() {
            if i > 0 {
                name.push('.');
            }
            name.push_str(segment);
            ends.push(name.len());
        }

        for (consumed, end) in ends.into_iter().enumerate().rev() {
            name.truncate(end);
            if let Some(location) = self.routes.get(&name) {
                return Some((name, location.clone(), consumed + 1));
            }
        }
        None
    }
}

/// True when no segment carries more than whitespace.
fn is_index_request(indexed: &[String]) -> bool {
    indexed.iter().all(|segment| segment.trim().is_empty())
}

/// Decode one residual argument (`+` is a space, invalid UTF-8 is replaced).
pub(crate) fn decode_argument(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

fn to_owned(segments: &[&str]) -> Vec<String> {
    segments.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::segments::ParamValue;

    fn routes(names: &[&str]) -> Arc<RouteMap> {
        Arc::new(
            names
                .iter()
                .map(|name| (*name, RouteLocation::new(format!("/path/to/routes/{name}.php"))))
                .collect::<RouteMap>(),
        )
    }

    fn resolver(config: ResolverConfig, names: &[&str]) -> Arc<Resolver> {
        Arc::new(Resolver::new(config, routes(names)))
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_longest_prefix_wins() {
        let resolver = resolver(
            ResolverConfig::default(),
            &["alpha", "alpha.beta", "alpha.beta.charley"],
        );
        let route = resolver.resolve("/alpha/beta/charley/delta/echo").unwrap();

        assert_eq!(route.name(), "alpha.beta.charley");
        assert_eq!(route.kind(), MatchKind::Exact);
        assert_eq!(route.arguments(), strings(&["delta", "echo"]).as_slice());
        assert_eq!(
            route.location().as_path(),
            std::path::Path::new("/path/to/routes/alpha.beta.charley.php")
        );
    }

    #[test]
    fn test_backtracks_to_shorter_prefix() {
        let resolver = resolver(ResolverConfig::default(), &["alpha"]);
        let resolution = resolver.search(&strings(&["alpha", "beta", "charley"])).unwrap();

        assert_eq!(resolution.name, "alpha");
        assert_eq!(resolution.arguments, strings(&["beta", "charley"]));
    }

    #[test]
    fn test_full_path_match_leaves_no_arguments() {
        let resolver = resolver(ResolverConfig::default(), &["alpha.beta"]);
        let route = resolver.resolve("/alpha/beta/").unwrap();

        assert_eq!(route.name(), "alpha.beta");
        assert!(route.arguments().is_empty());
    }

    #[test]
    fn test_empty_path_resolves_to_index() {
        let config = ResolverConfig {
            index_route: "_index".into(),
            ..ResolverConfig::default()
        };
        let resolver = resolver(config, &["_index"]);

        for url in ["/", "", "//", "/?page=2"] {
            let resolution = resolver.search(&parse_segments(url, true).indexed).unwrap();
            assert_eq!(resolution.name, "_index", "url {url:?}");
            assert!(resolution.arguments.is_empty());
        }

        let resolution = resolver.search(&strings(&[" ", "\t"])).unwrap();
        assert_eq!(resolution.name, "_index");

        // Encoded blanks are still real segments.
        assert!(resolver.search(&strings(&["%20"])).is_err());
    }

    #[test]
    fn test_catchall_takes_whole_path() {
        let resolver = resolver(ResolverConfig::default(), &["_catchall", "404", "zulu"]);
        let route = resolver.resolve("/alpha/beta/charley/delta/echo").unwrap();

        assert_eq!(route.name(), "_catchall");
        assert_eq!(route.kind(), MatchKind::CatchAll);
        assert_eq!(
            route.arguments(),
            strings(&["alpha", "beta", "charley", "delta", "echo"]).as_slice()
        );
    }

    #[test]
    fn test_not_found_when_no_catchall() {
        let resolver = resolver(ResolverConfig::default(), &["404"]);
        let route = resolver.resolve("/alpha/beta").unwrap();

        assert_eq!(route.name(), "404");
        assert_eq!(route.kind(), MatchKind::NotFound);
        assert_eq!(route.arguments(), strings(&["alpha", "beta"]).as_slice());
    }

    #[test]
    fn test_fallback_keeps_empty_keys() {
        let resolver = resolver(ResolverConfig::default(), &["404"]);
        let route = resolver.resolve("/zulu/=x/yankee").unwrap();

        assert_eq!(route.name(), "404");
        assert_eq!(route.arguments(), strings(&["zulu", "", "yankee"]).as_slice());
    }

    #[test]
    fn test_fallback_for_missing_index_gets_index_name() {
        let resolver = resolver(ResolverConfig::default(), &["_catchall"]);
        assert_eq!(resolver.config().index_route, "index");

        let route = resolver.resolve("/").unwrap();
        assert_eq!(route.name(), "_catchall");
        assert_eq!(route.arguments(), strings(&["index"]).as_slice());
    }

    #[test]
    fn test_absolute_and_relative_urls_resolve_alike() {
        let resolver = resolver(ResolverConfig::default(), &["alpha", "beta"]);

        for url in ["/alpha/../beta", "http://example.com/alpha/../beta"] {
            let route = resolver.resolve(url).unwrap();
            assert_eq!(route.name(), "alpha", "url {url:?}");
            assert_eq!(route.arguments(), strings(&["..", "beta"]).as_slice());
            assert_eq!(route.path(), "/alpha/../beta");
        }
    }

    #[test]
    fn test_missing_fallbacks_is_configuration_error() {
        let resolver = resolver(ResolverConfig::default(), &["alpha"]);
        let err = resolver.resolve("/zulu").unwrap_err();

        assert!(err.is_configuration());
        assert!(matches!(
            err,
            RouteError::NoFallback { ref catchall, ref notfound }
                if catchall == "_catchall" && notfound == "404"
        ));
    }

    #[test]
    fn test_named_parameters_without_pair_all() {
        let config = ResolverConfig {
            pair_all_segments: false,
            ..ResolverConfig::default()
        };
        let resolver = resolver(config, &["alpha.beta.charley"]);
        let route = resolver
            .resolve("/alpha/beta/charley=13/delta=atlanta/echo?foxtrot=gamma")
            .unwrap();

        assert_eq!(route.name(), "alpha.beta.charley");
        assert_eq!(route.arguments(), strings(&["delta", "echo"]).as_slice());
        assert_eq!(route.parameters().len(), 2);
        assert_eq!(route.parameters()["charley"], ParamValue::from("13"));
        assert_eq!(route.parameters()["delta"], ParamValue::from("atlanta"));
        assert_eq!(route.path(), "/alpha/beta/charley=13/delta=atlanta/echo");
    }

    #[test]
    fn test_filter_paired_arguments() {
        let config = ResolverConfig {
            pair_all_segments: false,
            filter_paired_arguments: true,
            ..ResolverConfig::default()
        };
        let resolver = resolver(config, &["alpha.beta.charley"]);
        let route = resolver
            .resolve("/alpha/beta/charley=13/delta=atlanta/echo")
            .unwrap();

        assert_eq!(route.arguments(), strings(&["echo"]).as_slice());
    }

    #[test]
    fn test_filter_with_pair_all_strips_every_argument() {
        let config = ResolverConfig {
            filter_paired_arguments: true,
            ..ResolverConfig::default()
        };
        let resolver = resolver(config, &["alpha"]);
        let route = resolver.resolve("/alpha/beta/charley").unwrap();

        assert!(route.arguments().is_empty());
        assert_eq!(route.parameters()["beta"], ParamValue::Keyless);
    }

    #[test]
    fn test_arguments_decoded_parameters_not() {
        let config = ResolverConfig {
            pair_all_segments: false,
            ..ResolverConfig::default()
        };
        let resolver = resolver(config, &["search"]);
        let route = resolver
            .resolve("/search/hello%20world/a+b/q=caf%C3%A9")
            .unwrap();

        assert_eq!(
            route.arguments(),
            strings(&["hello world", "a b", "q"]).as_slice()
        );
        assert_eq!(route.parameters()["q"], ParamValue::from("caf%C3%A9"));
    }

    #[test]
    fn test_empty_keys_are_not_candidates() {
        let resolver = resolver(ResolverConfig::default(), &["alpha.beta"]);
        let route = resolver.resolve("/alpha/=stray/beta").unwrap();

        assert_eq!(route.name(), "alpha.beta");
        assert!(route.arguments().is_empty());
    }

    #[test]
    fn test_decode_argument_is_lossy() {
        assert_eq!(decode_argument("caf%C3%A9"), "café");
        assert_eq!(decode_argument("%FF"), "\u{FFFD}");
        assert_eq!(decode_argument("100%"), "100%");
    }
}
