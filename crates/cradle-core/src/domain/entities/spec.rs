//! Package specification: what the user asked to scaffold.
//!
//! Built with [`PackageSpec::builder`]; `build()` validates the package name
//! and the cache policy, so a constructed `PackageSpec` is always well-formed.

use serde::Serialize;

use crate::domain::error::DomainError;
use crate::domain::value_objects::{CachePolicy, CiProvider, Lang, ModuleType, PlatformPreset};

/// Maximum npm package name length.
const MAX_NAME_LEN: usize = 214;

/// The library half of a specification.
///
/// Present only when the package wraps a Rust library published to npm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibrarySpec {
    pub lang: Lang,
    pub module: ModuleType,
    pub cache: Option<CachePolicy>,
    pub ci: Option<CiProvider>,
    pub platforms: Vec<PlatformPreset>,
}

impl LibrarySpec {
    pub fn new(lang: Lang) -> Self {
        Self {
            lang,
            module: ModuleType::default(),
            cache: Some(CachePolicy::npm()),
            ci: Some(CiProvider::GitHub),
            platforms: Vec::new(),
        }
    }

    pub fn module(mut self, module: ModuleType) -> Self {
        self.module = module;
        self
    }

    pub fn cache(mut self, cache: Option<CachePolicy>) -> Self {
        self.cache = cache;
        self
    }

    pub fn ci(mut self, ci: Option<CiProvider>) -> Self {
        self.ci = ci;
        self
    }

    pub fn platform(mut self, platform: PlatformPreset) -> Self {
        if !self.platforms.contains(&platform) {
            self.platforms.push(platform);
        }
        self
    }
}

/// Everything needed to scaffold one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSpec {
    name: String,
    library: Option<LibrarySpec>,
    /// Run the enrichment step unattended (`npm init --yes`).
    yes: bool,
}

impl PackageSpec {
    pub fn builder(name: impl Into<String>) -> PackageSpecBuilder {
        PackageSpecBuilder {
            name: name.into(),
            library: None,
            yes: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory the package is created in: the name without its `@scope/`.
    pub fn directory_name(&self) -> &str {
        self.name
            .rsplit_once('/')
            .map_or(self.name.as_str(), |(_, bare)| bare)
    }

    pub fn library(&self) -> Option<&LibrarySpec> {
        self.library.as_ref()
    }

    pub fn is_unattended(&self) -> bool {
        self.yes
    }

    /// CI provider, which only libraries carry.
    pub fn ci(&self) -> Option<CiProvider> {
        self.library.as_ref().and_then(|lib| lib.ci)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validate_package_name(&self.name)?;
        match self.library.as_ref().and_then(|lib| lib.cache.as_ref()) {
            Some(cache) => cache.validate(),
            None => Ok(()),
        }
    }
}

/// Builder for [`PackageSpec`].
#[derive(Debug, Clone)]
pub struct PackageSpecBuilder {
    name: String,
    library: Option<LibrarySpec>,
    yes: bool,
}

impl PackageSpecBuilder {
    pub fn library(mut self, library: LibrarySpec) -> Self {
        self.library = Some(library);
        self
    }

    pub fn unattended(mut self, yes: bool) -> Self {
        self.yes = yes;
        self
    }

    pub fn build(self) -> Result<PackageSpec, DomainError> {
        let library = self.library.map(|mut lib| {
            lib.cache = lib.cache.map(|cache| cache.resolved_for(&self.name));
            lib
        });

        let spec = PackageSpec {
            name: self.name,
            library,
            yes: self.yes,
        };
        spec.validate()?;
        Ok(spec)
    }
}

/// npm package name rules: optional `@scope/`, lowercase, URL-safe, no
/// leading `.` or `_`.
pub fn validate_package_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| Err(DomainError::InvalidSpec(format!("package name '{name}' {reason}")));

    if name.is_empty() {
        return invalid("cannot be empty");
    }
    if name.len() > MAX_NAME_LEN {
        return invalid("is longer than 214 characters");
    }
    if name != name.to_lowercase() {
        return invalid("must be lowercase");
    }

    let bare = match name.strip_prefix('@') {
        Some(scoped) => match scoped.split_once('/') {
            Some((scope, bare)) if !scope.is_empty() && is_url_safe(scope) => bare,
            _ => return invalid("has a malformed scope"),
        },
        None => name,
    };

    if bare.is_empty() {
        return invalid("has an empty name after the scope");
    }
    if bare.starts_with('.') || bare.starts_with('_') {
        return invalid("cannot start with '.' or '_'");
    }
    if !is_url_safe(bare) {
        return invalid("contains characters that are not URL-safe");
    }

    Ok(())
}

pub(crate) fn is_url_safe(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_application() {
        let spec = PackageSpec::builder("my-app").build().unwrap();
        assert_eq!(spec.name(), "my-app");
        assert!(spec.library().is_none());
        assert!(spec.ci().is_none());
        assert!(!spec.is_unattended());
    }

    #[test]
    fn builder_resolves_cache_org() {
        let spec = PackageSpec::builder("widget")
            .library(LibrarySpec::new(Lang::Ts))
            .build()
            .unwrap();
        let cache = spec.library().and_then(|l| l.cache.clone()).unwrap();
        assert_eq!(cache.to_string(), "npm:@widget");
    }

    #[test]
    fn build_rejects_hand_built_unsafe_cache() {
        let cache = CachePolicy::Npm {
            org: Some("@acme".into()),
            prefix: r#"x","private":true,"y":""#.into(),
        };
        let result = PackageSpec::builder("widget")
            .library(LibrarySpec::new(Lang::Ts).cache(Some(cache)))
            .build();
        assert!(matches!(result, Err(DomainError::InvalidSpec(_))));
    }

    #[test]
    fn scoped_names_create_bare_directories() {
        let spec = PackageSpec::builder("@acme/widget").build().unwrap();
        assert_eq!(spec.directory_name(), "widget");
        let plain = PackageSpec::builder("widget").build().unwrap();
        assert_eq!(plain.directory_name(), "widget");
    }

    #[test]
    fn library_ci_is_exposed() {
        let spec = PackageSpec::builder("widget")
            .library(LibrarySpec::new(Lang::Js).ci(Some(CiProvider::GitHub)))
            .build()
            .unwrap();
        assert_eq!(spec.ci(), Some(CiProvider::GitHub));
    }

    #[test]
    fn platforms_are_deduplicated() {
        let linux: PlatformPreset = "linux".parse().unwrap();
        let lib = LibrarySpec::new(Lang::Ts)
            .platform(linux.clone())
            .platform(linux);
        assert_eq!(lib.platforms.len(), 1);
    }

    #[test]
    fn package_names_are_validated() {
        for ok in ["a", "my-lib", "@acme/native", "lib.js", "x_y~z"] {
            assert!(validate_package_name(ok).is_ok(), "{ok} should be valid");
        }
        for bad in ["", "MyLib", ".hidden", "_private", "has space", "@/x", "@acme/", "a/b"] {
            assert!(validate_package_name(bad).is_err(), "{bad} should be invalid");
        }
    }

    #[test]
    fn build_rejects_invalid_name() {
        assert!(matches!(
            PackageSpec::builder("Bad Name").build(),
            Err(DomainError::InvalidSpec(_))
        ));
    }
}
