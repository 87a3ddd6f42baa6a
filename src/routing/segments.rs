//! URL segmentation and parameter extraction.
//!
//! # Responsibilities
//! - Reduce a URL to its path component (query and fragment dropped)
//! - Split the path into non-empty `/` chunks, preserving order
//! - Pull `key=value` chunks (and optionally bare chunks) into named parameters
//! - Remember which slot every key came from, for in-place rewriting
//!
//! # Design Decisions
//! - No percent-decoding here: parameter values stay exactly as they arrived
//! - Paths are cut at `?`/`#` without normalization, absolute or not, so `.`
//!   and `..` chunks survive as ordinary segments

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use url::Url;

/// Value of a named parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// `key=value` chunk. The value is kept undecoded.
    Value(String),
    /// Bare `key` chunk, present without a value.
    Keyless,
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Value(value) => Some(value),
            ParamValue::Keyless => None,
        }
    }

    pub fn is_keyless(&self) -> bool {
        matches!(self, ParamValue::Keyless)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Value(value.to_string())
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Value(value) => serializer.serialize_str(value),
            ParamValue::Keyless => serializer.serialize_none(),
        }
    }
}

/// Named parameters by key.
pub type Parameters = BTreeMap<String, ParamValue>;

/// Key to segment position.
pub type IndexMap = BTreeMap<String, usize>;

/// Result of splitting a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPath {
    /// Path component of the URL, as given.
    pub path: String,
    /// Raw non-empty chunks (`beta=12` stays `beta=12`).
    pub segments: Vec<String>,
    /// Key portion of every chunk, same length and order as `segments`.
    pub indexed: Vec<String>,
    pub parameters: Parameters,
    pub index_map: IndexMap,
}

/// Split `url` into segments and named parameters.
///
/// With `pair_all` set, chunks without `=` are recorded as keyless parameters.
pub fn parse_segments(url: &str, pair_all: bool) -> ParsedPath {
    let path = path_component(url);
    let mut parsed = ParsedPath::default();

    for chunk in path.split('/').filter(|chunk| !chunk.is_empty()) {
        let key = match chunk.split_once('=') {
            Some((key, value)) => {
                parsed
                    .parameters
                    .insert(key.to_string(), ParamValue::Value(value.to_string()));
                key
            }
            None => {
                if pair_all {
                    parsed.parameters.insert(chunk.to_string(), ParamValue::Keyless);
                }
                chunk
            }
        };

        if !key.is_empty() {
            parsed.index_map.insert(key.to_string(), parsed.segments.len());
        }
        parsed.indexed.push(key.to_string());
        parsed.segments.push(chunk.to_string());
    }

    parsed.path = path;
    parsed
}

/// Path component of a full or relative URL, exactly as written.
///
/// `url` only decides whether the input is absolute; the path itself is
/// sliced from the input so `.`/`..` chunks and raw characters survive.
pub fn path_component(url: &str) -> String {
    let trimmed = url.trim();

    let Some(start) = scheme_end(trimmed) else {
        return trimmed.split(['?', '#']).next().unwrap_or_default().to_string();
    };

    let rest = &trimmed[start..];
    let rest = match rest.strip_prefix("//") {
        Some(authority) => {
            let end = authority.find(['/', '?', '#']).unwrap_or(authority.len());
            &authority[end..]
        }
        None => rest,
    };

    match rest.split(['?', '#']).next().unwrap_or_default() {
        "" => "/".to_string(),
        path => path.to_string(),
    }
}

/// Byte offset just past `scheme:` when `url` is an absolute hierarchical
/// URL. Protocol-relative input (`//host/...`) has no scheme and yields 0.
fn scheme_end(url: &str) -> Option<usize> {
    if url.starts_with("//") {
        return Url::parse(&format!("http:{url}")).ok().map(|_| 0);
    }

    let parsed = Url::parse(url).ok().filter(|parsed| !parsed.cannot_be_a_base())?;
    let scheme = parsed.scheme();
    url.get(..scheme.len())
        .filter(|raw| raw.eq_ignore_ascii_case(scheme))
        .map(|_| scheme.len() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_query_and_fragment_dropped() {
        assert_eq!(path_component("/alpha/beta?foxtrot=gamma"), "/alpha/beta");
        assert_eq!(path_component("/alpha/beta#top"), "/alpha/beta");
        assert_eq!(
            path_component("https://example.com/alpha/beta?x=1#frag"),
            "/alpha/beta"
        );
        assert_eq!(path_component("//example.com/alpha"), "/alpha");
        assert_eq!(path_component("http://example.com"), "/");
        assert_eq!(path_component("HTTP://example.com:8080?x=1"), "/");
    }

    #[test]
    fn test_absolute_paths_are_not_normalized() {
        assert_eq!(path_component("http://example.com/alpha/../beta"), "/alpha/../beta");
        assert_eq!(path_component("//example.com/./alpha"), "/./alpha");
        assert_eq!(
            path_component("https://user@example.com/search/q=a b"),
            "/search/q=a b"
        );

        let parsed = parse_segments("http://example.com/search/q=a b", false);
        assert_eq!(parsed.parameters["q"], ParamValue::from("a b"));
        assert_eq!(parsed.parameters, parse_segments("/search/q=a b", false).parameters);
    }

    #[test]
    fn test_plain_segments() {
        let parsed = parse_segments("/alpha/beta/charley/delta/echo?foxtrot=gamma", false);

        assert_eq!(parsed.path, "/alpha/beta/charley/delta/echo");
        assert_eq!(parsed.indexed, strings(&["alpha", "beta", "charley", "delta", "echo"]));
        assert!(parsed.parameters.is_empty());
        assert_eq!(parsed.index_map["alpha"], 0);
        assert_eq!(parsed.index_map["echo"], 4);
    }

    #[test]
    fn test_paired_segments() {
        let parsed = parse_segments("/alpha/beta/charley=13/delta=atlanta/echo", false);

        assert_eq!(parsed.indexed, strings(&["alpha", "beta", "charley", "delta", "echo"]));
        assert_eq!(
            parsed.segments,
            strings(&["alpha", "beta", "charley=13", "delta=atlanta", "echo"])
        );
        assert_eq!(parsed.parameters.len(), 2);
        assert_eq!(parsed.parameters["charley"], ParamValue::from("13"));
        assert_eq!(parsed.parameters["delta"], ParamValue::from("atlanta"));
        assert_eq!(parsed.index_map["charley"], 2);
        assert_eq!(parsed.index_map["delta"], 3);
    }

    #[test]
    fn test_pair_all_marks_bare_segments_keyless() {
        let parsed = parse_segments("/alpha/beta=2", true);

        assert_eq!(parsed.parameters["alpha"], ParamValue::Keyless);
        assert_eq!(parsed.parameters["beta"], ParamValue::from("2"));
        assert!(parsed.parameters["alpha"].is_keyless());
        assert_eq!(parsed.parameters["alpha"].as_str(), None);
        assert_eq!(parsed.parameters["beta"].as_str(), Some("2"));
        assert_ne!(parsed.parameters["alpha"], ParamValue::from(""));
    }

    #[test]
    fn test_split_at_first_equals() {
        let parsed = parse_segments("/query=a=b", false);
        assert_eq!(parsed.parameters["query"], ParamValue::from("a=b"));
        assert_eq!(parsed.indexed, strings(&["query"]));
    }

    #[test]
    fn test_empty_chunks_collapse() {
        let parsed = parse_segments("//alpha///beta/", false);
        assert_eq!(parsed.indexed, strings(&["alpha", "beta"]));
        assert_eq!(parsed.index_map["beta"], 1);

        let parsed = parse_segments("/", true);
        assert!(parsed.segments.is_empty());
        assert!(parsed.parameters.is_empty());
    }

    #[test]
    fn test_values_are_not_decoded() {
        let parsed = parse_segments("/search/q=hello%20world", false);
        assert_eq!(parsed.parameters["q"], ParamValue::from("hello%20world"));
    }

    #[test]
    fn test_empty_key_not_indexed() {
        let parsed = parse_segments("/alpha/=orphan", false);
        assert_eq!(parsed.indexed, strings(&["alpha", ""]));
        assert_eq!(parsed.parameters[""], ParamValue::from("orphan"));
        assert!(!parsed.index_map.contains_key(""));
    }

    #[test]
    fn test_duplicate_keys_keep_last() {
        let parsed = parse_segments("/page=1/page=2", false);
        assert_eq!(parsed.parameters["page"], ParamValue::from("2"));
        assert_eq!(parsed.index_map["page"], 1);
    }
}
