//! The metadata context every template is rendered against.
//!
//! ```json
//! {
//!   "packageSpec": { "name": "...", "library": { ... } | null, "yes": false },
//!   "crateName":   "...",
//!   "versions":    { "neon": "1", ... },
//!   "package":     { "name": "...", "version": "...", ... } | null
//! }
//! ```
//!
//! Optional values serialise as `null` rather than being omitted, so a
//! strict-mode template can always test them with `{{#if}}`.

use serde::Serialize;
use serde_json::Value;

use crate::domain::entities::package::PackageRecord;
use crate::domain::entities::spec::PackageSpec;

/// Dependency versions pinned into generated files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Versions {
    pub neon: &'static str,
    pub neon_cli: &'static str,
    pub typescript: &'static str,
    pub types_node: &'static str,
    pub tsconfig_node: &'static str,
    pub node: &'static str,
    pub actions_checkout: &'static str,
    pub actions_setup_node: &'static str,
    pub actions_rust_toolchain: &'static str,
}

impl Versions {
    pub const CURRENT: Versions = Versions {
        neon: "1",
        neon_cli: "0.1.82",
        typescript: "^5.3.3",
        types_node: "^20.11.16",
        tsconfig_node: "^20.1.4",
        node: "20",
        actions_checkout: "v4",
        actions_setup_node: "v4",
        actions_rust_toolchain: "v1",
    };
}

impl Default for Versions {
    fn default() -> Self {
        Self::CURRENT
    }
}

/// Read-only context shared by every expansion in one scaffold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    package_spec: PackageSpec,
    /// Cargo crate name derived from the package name.
    crate_name: String,
    versions: Versions,
    package: Option<PackageRecord>,
}

impl Metadata {
    pub fn new(package_spec: PackageSpec) -> Self {
        Self {
            crate_name: crate_name(package_spec.directory_name()),
            package_spec,
            versions: Versions::default(),
            package: None,
        }
    }

    /// A new context that also carries the composed package record.
    pub fn with_package(&self, package: PackageRecord) -> Self {
        Self {
            package_spec: self.package_spec.clone(),
            crate_name: self.crate_name.clone(),
            versions: self.versions.clone(),
            package: Some(package),
        }
    }

    pub fn package_spec(&self) -> &PackageSpec {
        &self.package_spec
    }

    pub fn crate_name(&self) -> &str {
        &self.crate_name
    }

    pub fn versions(&self) -> &Versions {
        &self.versions
    }

    pub fn package(&self) -> Option<&PackageRecord> {
        self.package.as_ref()
    }

    /// The JSON value templates are rendered against.
    pub fn to_context(&self) -> Value {
        // every field is a plain string/enum/option; serialisation is infallible
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// npm allows `.` and `~` in names; Cargo does not.
fn crate_name(bare: &str) -> String {
    bare.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
