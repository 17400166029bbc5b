//! Provider registry: the template sets each language and CI provider adds.
//!
//! Every provider is described exactly once by a static [`ProviderDef`].
//! Typed handles ([`Lang`], [`CiProvider`]) reach it through an exhaustive
//! `definition()` match; string selectors go through [`PROVIDER_REGISTRY`].
//!
//! # Adding a New Provider
//!
//! 1. Add a variant to `Lang` or `CiProvider` in `value_objects.rs`
//! 2. Add its `static` [`ProviderDef`], return it from `definition()` and
//!    list it in [`PROVIDER_REGISTRY`]
//! 3. Ship its templates in the template store

use std::fmt;

use crate::domain::entities::template::{Helper, HelperSet, TemplateId, TemplateMap};
use crate::domain::error::DomainError;
use crate::domain::value_objects::{CiProvider, Lang};

/// Files every package gets, rendered after the manifest is composed.
pub static COMMON_TEMPLATES: &[(&str, &str)] = &[
    (".gitignore.hbs", ".gitignore"),
    ("Cargo.toml.hbs", "Cargo.toml"),
    ("README.md.hbs", "README.md"),
    ("src/lib.rs.hbs", "src/lib.rs"),
];

/// Manifest fragment templates.
pub const MANIFEST_BASE_LIBRARY: &str = "manifest/base/library.json.hbs";
pub const MANIFEST_BASE_DEFAULT: &str = "manifest/base/default.json.hbs";
pub const MANIFEST_SCRIPTS: &str = "manifest/scripts.json.hbs";

/// Which family a provider belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Language,
    Ci,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Language => "language",
            Self::Ci => "ci",
        })
    }
}

/// Static description of one provider.
#[derive(Debug, Clone, Copy)]
pub struct ProviderDef {
    /// Stable type tag, also the selector users type.
    pub tag: &'static str,
    pub kind: ProviderKind,
    /// `(template id, output path)` pairs.
    pub templates: &'static [(&'static str, &'static str)],
    /// Helpers the provider's templates need.
    pub helpers: &'static [Helper],
    /// Whether the provider contributes an npm-scripts mixin.
    pub scripts_mixin: bool,
}

static JS: ProviderDef = ProviderDef {
    tag: "js",
    kind: ProviderKind::Language,
    templates: &[],
    helpers: &[],
    scripts_mixin: false,
};

static DTS: ProviderDef = ProviderDef {
    tag: "dts",
    kind: ProviderKind::Language,
    templates: &[],
    helpers: &[],
    scripts_mixin: false,
};

static TS: ProviderDef = ProviderDef {
    tag: "ts",
    kind: ProviderKind::Language,
    templates: &[
        ("tsconfig.json.hbs", "tsconfig.json"),
        ("ts/index.cts.hbs", "ts/index.cts"),
        ("ts/index.mts.hbs", "ts/index.mts"),
        ("ts/load.cts.hbs", "ts/load.cts"),
    ],
    helpers: &[],
    scripts_mixin: false,
};

static GITHUB: ProviderDef = ProviderDef {
    tag: "github",
    kind: ProviderKind::Ci,
    templates: &[
        ("ci/github/setup.yml.hbs", ".github/actions/setup/action.yml"),
        ("ci/github/.env.hbs", ".github/.env"),
        ("ci/github/build.yml.hbs", ".github/workflows/build.yml"),
        ("ci/github/comments.yml.hbs", ".github/workflows/comments.yml"),
        ("ci/github/release.yml.hbs", ".github/workflows/release.yml"),
        ("ci/github/test.yml.hbs", ".github/workflows/test.yml"),
    ],
    helpers: &[Helper::GithubExpression],
    scripts_mixin: true,
};

/// Single source of truth for provider capabilities: languages first,
/// then CI providers.
pub static PROVIDER_REGISTRY: &[&ProviderDef] = &[&JS, &DTS, &TS, &GITHUB];

/// What every language binding and CI provider can do.
pub trait Provider {
    /// Stable type tag.
    fn type_tag(&self) -> &'static str;

    /// Template id → output path mapping.
    fn templates(&self) -> TemplateMap;

    /// One-time setup before expansion: the helpers this provider's
    /// templates need. Calling it repeatedly yields the same set.
    fn setup(&self) -> HelperSet {
        HelperSet::empty()
    }
}

/// Look up a definition by tag.
pub fn find_provider(tag: &str) -> Result<&'static ProviderDef, DomainError> {
    let tag = tag.to_ascii_lowercase();
    PROVIDER_REGISTRY
        .iter()
        .copied()
        .find(|def| def.tag == tag)
        .ok_or(DomainError::UnknownProvider { selector: tag })
}

/// All definitions of one kind, in registry order.
pub fn providers_of(kind: ProviderKind) -> impl Iterator<Item = &'static ProviderDef> {
    PROVIDER_REGISTRY
        .iter()
        .copied()
        .filter(move |def| def.kind == kind)
}

impl Provider for ProviderDef {
    fn type_tag(&self) -> &'static str {
        self.tag
    }

    fn templates(&self) -> TemplateMap {
        TemplateMap::from_table(self.templates)
    }

    fn setup(&self) -> HelperSet {
        HelperSet::empty().with(self.helpers)
    }
}

impl Provider for Lang {
    fn type_tag(&self) -> &'static str {
        self.as_str()
    }

    fn templates(&self) -> TemplateMap {
        self.definition().templates()
    }

    fn setup(&self) -> HelperSet {
        self.definition().setup()
    }
}

impl Provider for CiProvider {
    fn type_tag(&self) -> &'static str {
        self.as_str()
    }

    fn templates(&self) -> TemplateMap {
        self.definition().templates()
    }

    fn setup(&self) -> HelperSet {
        self.definition().setup()
    }
}

impl CiProvider {
    /// Template adding this provider's npm scripts, if it has one.
    pub fn scripts_mixin(&self) -> Option<TemplateId> {
        self.definition()
            .scripts_mixin
            .then(|| TemplateId::ci_scripts_mixin(self.as_str()))
    }
}

impl Lang {
    /// Registry definition of this language.
    pub fn definition(&self) -> &'static ProviderDef {
        match self {
            Self::Js => &JS,
            Self::Dts => &DTS,
            Self::Ts => &TS,
        }
    }
}

impl CiProvider {
    /// Registry definition of this CI provider.
    pub fn definition(&self) -> &'static ProviderDef {
        match self {
            Self::GitHub => &GITHUB,
        }
    }
}
