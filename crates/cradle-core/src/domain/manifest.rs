//! Pure manifest algorithms: fragment parsing, scripts overlay, key order.
//!
//! Nothing here touches the filesystem or the template engine; the
//! `ManifestComposer` service wires these steps to its ports.

use std::fmt;

use serde_json::{Map, Value};

/// Top-level keys in the order `npm init` writes them.
pub const CANONICAL_KEYS: [&str; 7] = [
    "name",
    "version",
    "description",
    "main",
    "scripts",
    "author",
    "license",
];

/// The manifest composition stage a fragment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestStage {
    Base,
    Scripts,
    Mixin,
    PostEnrichment,
}

impl ManifestStage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Scripts => "scripts",
            Self::Mixin => "mixin",
            Self::PostEnrichment => "post-enrichment",
        }
    }
}

impl fmt::Display for ManifestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type Scripts = Map<String, Value>;

/// Parse a fragment that must be a JSON object.
pub fn parse_object(text: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!("expected a JSON object, found {}", kind_of(&other))),
        Err(e) => Err(e.to_string()),
    }
}

/// Parse a scripts fragment: a flat object of string → string.
pub fn parse_scripts(text: &str) -> Result<Scripts, String> {
    let map = parse_object(text)?;
    if let Some((key, value)) = map.iter().find(|(_, v)| !v.is_string()) {
        return Err(format!(
            "script '{key}' must be a string, found {}",
            kind_of(value)
        ));
    }
    Ok(map)
}

/// Overlay `mixin` onto `scripts`.
///
/// Colliding keys take the mixin's value but keep their position; keys only
/// in the mixin are appended in mixin order.
pub fn overlay_scripts(scripts: &mut Scripts, mixin: Scripts) {
    for (key, value) in mixin {
        scripts.insert(key, value);
    }
}

/// Reorder top-level keys: canonical keys first in [`CANONICAL_KEYS`] order,
/// then every other key in its existing relative order.
///
/// Idempotent. Keys absent from the input are not introduced.
pub fn normalize_key_order(manifest: Map<String, Value>) -> Map<String, Value> {
    let mut canonical: [Option<(String, Value)>; CANONICAL_KEYS.len()] = Default::default();
    let mut rest = Vec::with_capacity(manifest.len());

    for (key, value) in manifest {
        match CANONICAL_KEYS.iter().position(|k| *k == key) {
            Some(slot) => canonical[slot] = Some((key, value)),
            None => rest.push((key, value)),
        }
    }

    canonical.into_iter().flatten().chain(rest).collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
