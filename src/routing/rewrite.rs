//! URL rewriting from a resolved route.
//!
//! # Design Decisions
//! - Known keys are overwritten in the slot they came from; unknown keys append
//! - Untouched segments are copied through verbatim, still encoded
//! - Values are form-encoded (`+` for spaces), mirroring argument decoding

use url::form_urlencoded;

use crate::routing::segments::IndexMap;

/// Change to apply to one named segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamChange {
    /// Render as `key=value`.
    Value(String),
    /// Render as the bare key.
    Keyless,
    /// Drop the segment.
    Omit,
}

impl ParamChange {
    pub fn value(value: impl Into<String>) -> Self {
        ParamChange::Value(value.into())
    }

    /// Parse a command-line change: `key=value`, `key` (keyless) or `-key` (omit).
    pub fn parse_arg(arg: &str) -> (String, ParamChange) {
        if let Some((key, value)) = arg.split_once('=') {
            return (key.to_string(), ParamChange::value(value));
        }
        match arg.strip_prefix('-') {
            Some(key) if !key.is_empty() => (key.to_string(), ParamChange::Omit),
            _ => (arg.to_string(), ParamChange::Keyless),
        }
    }
}

impl From<&str> for ParamChange {
    fn from(value: &str) -> Self {
        ParamChange::value(value)
    }
}

impl From<String> for ParamChange {
    fn from(value: String) -> Self {
        ParamChange::Value(value)
    }
}

/// Rebuild a path from `segments` with `changes` applied.
pub fn rewrite_path<I, K>(segments: &[String], index_map: &IndexMap, changes: I) -> String
where
    I: IntoIterator<Item = (K, ParamChange)>,
    K: AsRef<str>,
{
    // `None` marks a removed slot.
    let mut slots: Vec<Option<String>> = segments.iter().cloned().map(Some).collect();

    for (key, change) in changes {
        let key = key.as_ref();
        let token = match change {
            ParamChange::Value(value) => Some(format!("{key}={}", encode_value(&value))),
            ParamChange::Keyless => Some(key.to_string()),
            ParamChange::Omit => None,
        };

        match index_map.get(key) {
            Some(&slot) if slot < slots.len() => slots[slot] = token,
            _ => slots.push(token),
        }
    }

    let kept: Vec<String> = slots
        .into_iter()
        .flatten()
        .filter(|segment| !segment.is_empty())
        .collect();
    format!("/{}", kept.join("/"))
}

fn encode_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
