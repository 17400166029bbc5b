//! Template identity, template mappings, and render helper sets.
//!
//! A [`TemplateId`] is a logical, slash-separated name such as
//! `manifest/base/library.json.hbs`. Where its source text lives is the
//! concern of the `TemplateStore` port; how it is rendered is the concern of
//! the `TemplateRenderer` port.
//!
//! A [`TemplateMap`] pairs template ids with the path they are written to,
//! relative to the package root. One map exists per capability (the common
//! files, each language, each CI provider).

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::domain::entities::common::RelativePath;
use crate::domain::error::DomainError;

// ── TemplateId ───────────────────────────────────────────────────────────────

/// Logical template name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TemplateId(String);

impl TemplateId {
    /// Create a new template id.
    ///
    /// Backslashes are normalised to `/` so ids built from Windows paths
    /// match ids written in code.
    pub fn new(id: impl Into<String>) -> Self {
        let id: String = id.into();
        Self(id.replace('\\', "/"))
    }

    /// Mixin of extra npm scripts contributed by a CI provider.
    pub fn ci_scripts_mixin(type_tag: &str) -> Self {
        Self(format!("ci/{type_tag}/manifest/scripts.json.hbs"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// ── TemplateMap ──────────────────────────────────────────────────────────────

/// One template and where its output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMapEntry {
    pub template: TemplateId,
    pub output: RelativePath,
}

/// Template-id → output-path mapping.
///
/// Entries are independent of each other; iteration order carries no meaning
/// beyond being stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateMap {
    entries: Vec<TemplateMapEntry>,
}

impl TemplateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a static `(template, output)` table.
    pub fn from_table(table: &[(&str, &str)]) -> Self {
        let entries = table
            .iter()
            .map(|(template, output)| TemplateMapEntry {
                template: TemplateId::new(*template),
                output: RelativePath::new(*output),
            })
            .collect();
        Self { entries }
    }

    pub fn insert(&mut self, template: TemplateId, output: RelativePath) {
        self.entries.push(TemplateMapEntry { template, output });
    }

    /// Append every entry of `other`.
    pub fn extend(&mut self, other: TemplateMap) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateMapEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Output path for a template id, if mapped.
    pub fn output_for(&self, template: &TemplateId) -> Option<&RelativePath> {
        self.entries
            .iter()
            .find(|e| &e.template == template)
            .map(|e| &e.output)
    }

    /// Template ids and output paths must each be unique.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut templates = HashSet::new();
        let mut outputs = HashSet::new();

        for entry in &self.entries {
            if !templates.insert(&entry.template) {
                return Err(DomainError::InvalidSpec(format!(
                    "template '{}' mapped twice",
                    entry.template
                )));
            }
            if !outputs.insert(&entry.output) {
                return Err(DomainError::DuplicatePath {
                    path: entry.output.to_string(),
                });
            }
        }

        Ok(())
    }
}

impl IntoIterator for TemplateMap {
    type Item = TemplateMapEntry;
    type IntoIter = std::vec::IntoIter<TemplateMapEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// A render helper a provider can ask the template engine to expose.
///
/// The domain only names helpers; the renderer adapter supplies their
/// implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Helper {
    /// `{{#gh_expr}}body{{/gh_expr}}` renders as `${{body}}`, the GitHub
    /// Actions expression syntax that would otherwise clash with template
    /// delimiters.
    GithubExpression,
}

impl Helper {
    /// Name templates use to invoke the helper.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GithubExpression => "gh_expr",
        }
    }
}

/// The helpers active for one render.
///
/// Passed explicitly with every render call, so two scaffolds with different
/// providers never observe each other's helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelperSet {
    helpers: Vec<Helper>,
}

impl HelperSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Activate a helper. Activating one twice is a no-op.
    pub fn activate(&mut self, helper: Helper) {
        if !self.helpers.contains(&helper) {
            self.helpers.push(helper);
        }
    }

    pub fn with(mut self, helpers: &[Helper]) -> Self {
        for helper in helpers {
            self.activate(*helper);
        }
        self
    }

    /// Activate every helper of `other` as well.
    pub fn merge(&mut self, other: &HelperSet) {
        for helper in other.iter() {
            self.activate(helper);
        }
    }

    pub fn contains(&self, helper: Helper) -> bool {
        self.helpers.contains(&helper)
    }

    pub fn iter(&self) -> impl Iterator<Item = Helper> + '_ {
        self.helpers.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_id_normalises_backslashes() {
        assert_eq!(TemplateId::new("ts\\index.cts.hbs").as_str(), "ts/index.cts.hbs");
    }

    #[test]
    fn ci_mixin_id_uses_type_tag() {
        assert_eq!(
            TemplateId::ci_scripts_mixin("github").as_str(),
            "ci/github/manifest/scripts.json.hbs"
        );
    }

    #[test]
    fn template_map_rejects_duplicate_outputs() {
        let map = TemplateMap::from_table(&[("a.hbs", "out.txt"), ("b.hbs", "out.txt")]);
        assert!(matches!(map.validate(), Err(DomainError::DuplicatePath { .. })));
    }

    #[test]
    fn template_map_rejects_duplicate_templates() {
        let map = TemplateMap::from_table(&[("a.hbs", "one.txt"), ("a.hbs", "two.txt")]);
        assert!(map.validate().is_err());
    }

    #[test]
    fn template_map_lookup() {
        let map = TemplateMap::from_table(&[("tsconfig.json.hbs", "tsconfig.json")]);
        assert_eq!(
            map.output_for(&"tsconfig.json.hbs".into()).map(|p| p.to_string()),
            Some("tsconfig.json".to_string())
        );
        assert!(map.output_for(&"missing.hbs".into()).is_none());
    }

    #[test]
    fn helper_set_activation_is_idempotent() {
        let mut set = HelperSet::empty();
        set.activate(Helper::GithubExpression);
        set.activate(Helper::GithubExpression);
        assert_eq!(set.iter().count(), 1);
        assert!(set.contains(Helper::GithubExpression));
    }
}
