use serde::Serialize;
use serde_json::{Map, Value};

/// Reduced view of the final, normalised manifest.
///
/// Built once after the enrichment step and never mutated. The `quoted_*`
/// fields hold the JSON string literal of their counterpart, ready to be
/// pasted into TOML or JavaScript templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRecord {
    pub name: Option<String>,
    pub version: Option<String>,
    pub author: Option<String>,
    pub quoted_author: Option<String>,
    pub license: Option<String>,
    pub description: Option<String>,
    pub quoted_description: Option<String>,
}

impl PackageRecord {
    pub fn from_manifest(manifest: &Map<String, Value>) -> Self {
        let author = manifest.get("author").and_then(person);
        let description = string_field(manifest, "description");

        Self {
            name: string_field(manifest, "name"),
            version: string_field(manifest, "version"),
            quoted_author: author.as_deref().map(quote),
            author,
            license: string_field(manifest, "license"),
            quoted_description: description.as_deref().map(quote),
            description,
        }
    }
}

fn string_field(manifest: &Map<String, Value>, key: &str) -> Option<String> {
    manifest.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// npm accepts `author` either as a string or as `{ name, email, url }`.
fn person(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => {
            let name = obj.get("name").and_then(Value::as_str)?;
            let mut out = name.to_string();
            if let Some(email) = obj.get("email").and_then(Value::as_str) {
                out.push_str(&format!(" <{email}>"));
            }
            if let Some(url) = obj.get("url").and_then(Value::as_str) {
                out.push_str(&format!(" ({url})"));
            }
            Some(out)
        }
        _ => None,
    }
}

fn quote(s: &str) -> String {
    // serializing a &str cannot fail
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manifest(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn extracts_fields_and_quotes() {
        let record = PackageRecord::from_manifest(&manifest(json!({
            "name": "widget",
            "version": "1.0.0",
            "author": "A \"quoted\" name",
            "license": "MIT",
            "description": "line\nbreak",
        })));

        assert_eq!(record.name.as_deref(), Some("widget"));
        assert_eq!(record.version.as_deref(), Some("1.0.0"));
        assert_eq!(record.quoted_author.as_deref(), Some(r#""A \"quoted\" name""#));
        assert_eq!(record.quoted_description.as_deref(), Some(r#""line\nbreak""#));
        assert_eq!(record.license.as_deref(), Some("MIT"));
    }

    #[test]
    fn missing_fields_are_none() {
        let record = PackageRecord::from_manifest(&manifest(json!({ "name": "widget" })));
        assert!(record.version.is_none());
        assert!(record.author.is_none());
        assert!(record.quoted_author.is_none());
    }

    #[test]
    fn author_object_is_flattened() {
        let record = PackageRecord::from_manifest(&manifest(json!({
            "author": { "name": "Ada", "email": "ada@example.com", "url": "https://ada.dev" }
        })));
        assert_eq!(
            record.author.as_deref(),
            Some("Ada <ada@example.com> (https://ada.dev)")
        );
    }
}
