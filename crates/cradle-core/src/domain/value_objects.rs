//! Domain value objects: Lang, ModuleType, CachePolicy, CiProvider, PlatformPreset.
//!
//! # Design
//!
//! Plain values compared by value, with no identity. They hold NO
//! template knowledge. Which templates a language or CI provider contributes
//! lives in `providers.rs`. This file's only job is to define the types, their
//! string representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add a provider entry in `providers.rs`

use crate::domain::entities::spec::is_url_safe;
use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Lang ─────────────────────────────────────────────────────────────────────

/// The language flavour of the JavaScript-facing side of a library.
///
/// `Dts` is plain JavaScript shipped with hand-written type declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Js,
    Dts,
    Ts,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::Js, Lang::Dts, Lang::Ts];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Dts => "dts",
            Self::Ts => "ts",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lang {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "js" | "javascript" => Ok(Self::Js),
            "dts" => Ok(Self::Dts),
            "ts" | "typescript" => Ok(Self::Ts),
            other => Err(DomainError::InvalidSpec(format!("unknown language: {other}"))),
        }
    }
}

// ── ModuleType ───────────────────────────────────────────────────────────────

/// Module system the generated package exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    #[default]
    Esm,
    Cjs,
}

impl ModuleType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Esm => "esm",
            Self::Cjs => "cjs",
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "esm" | "module" => Ok(Self::Esm),
            "cjs" | "commonjs" => Ok(Self::Cjs),
            other => Err(DomainError::InvalidSpec(format!(
                "unknown module type: {other}"
            ))),
        }
    }
}

// ── CachePolicy ──────────────────────────────────────────────────────────────

/// Where prebuilt binaries for each platform are published.
///
/// Parsed from `npm`, `npm:@org`, `npm:@org/prefix-`. The literal `none` is
/// handled by callers as "no cache" (`Option::None`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CachePolicy {
    Npm {
        /// npm scope the per-platform packages are published under.
        org: Option<String>,
        /// Prefix prepended to every per-platform package name.
        prefix: String,
    },
}

impl CachePolicy {
    pub fn npm() -> Self {
        Self::Npm {
            org: None,
            prefix: String::new(),
        }
    }

    /// Both parts end up inside npm package names (`<org>/<prefix><platform>`),
    /// so they follow the package-name rules: lowercase and URL-safe, and the
    /// scope cannot start with `.` or `_`.
    pub fn validate(&self) -> Result<(), DomainError> {
        let Self::Npm { org, prefix } = self;

        if let Some(org) = org {
            let scope = org.strip_prefix('@').unwrap_or_default();
            if scope.is_empty()
                || scope.starts_with(['.', '_'])
                || !is_npm_name_part(scope)
            {
                return Err(DomainError::InvalidSpec(format!(
                    "npm cache org '{org}' is not a valid npm scope"
                )));
            }
        }

        if !prefix.is_empty() && !is_npm_name_part(prefix) {
            return Err(DomainError::InvalidSpec(format!(
                "npm cache prefix '{prefix}' must be lowercase and URL-safe"
            )));
        }

        Ok(())
    }

    /// Fill in the scope from the package name when none was given.
    ///
    /// `@scope/pkg` keeps `@scope`; a bare `pkg` becomes `@pkg`.
    pub fn resolved_for(&self, package_name: &str) -> Self {
        match self {
            Self::Npm { org: Some(_), .. } => self.clone(),
            Self::Npm { org: None, prefix } => {
                let org = match package_name.split_once('/') {
                    Some((scope, _)) if scope.starts_with('@') => scope.to_string(),
                    _ => format!("@{package_name}"),
                };
                Self::Npm {
                    org: Some(org),
                    prefix: prefix.clone(),
                }
            }
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Npm { org: None, .. } => f.write_str("npm"),
            Self::Npm {
                org: Some(org),
                prefix,
            } if prefix.is_empty() => write!(f, "npm:{org}"),
            Self::Npm {
                org: Some(org),
                prefix,
            } => write!(f, "npm:{org}/{prefix}"),
        }
    }
}

impl FromStr for CachePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = match s.split_once(':') {
            Some((kind, rest)) => (kind, Some(rest)),
            None => (s, None),
        };

        if !kind.eq_ignore_ascii_case("npm") {
            return Err(DomainError::InvalidSpec(format!(
                "unknown cache policy: {s}"
            )));
        }

        let Some(rest) = rest else {
            return Ok(Self::npm());
        };

        if !rest.starts_with('@') || rest.len() < 2 {
            return Err(DomainError::InvalidSpec(format!(
                "npm cache org must start with '@': {rest}"
            )));
        }

        let (org, prefix) = match rest.split_once('/') {
            Some((org, prefix)) => (org, prefix),
            None => (rest, ""),
        };

        let policy = Self::Npm {
            org: Some(org.to_string()),
            prefix: prefix.to_string(),
        };
        policy.validate()?;
        Ok(policy)
    }
}

fn is_npm_name_part(s: &str) -> bool {
    s == s.to_lowercase() && is_url_safe(s)
}

// ── CiProvider ───────────────────────────────────────────────────────────────

/// A continuous-integration provider.
///
/// Closed set: every member has an entry in `providers::PROVIDER_REGISTRY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CiProvider {
    GitHub,
}

impl CiProvider {
    pub const ALL: [CiProvider; 1] = [CiProvider::GitHub];

    /// Stable type tag. Used to build template ids like `ci/<tag>/...`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GitHub => "github",
        }
    }
}

impl fmt::Display for CiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CiProvider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "github" | "gh" => Ok(Self::GitHub),
            other => Err(DomainError::UnknownProvider {
                selector: other.to_string(),
            }),
        }
    }
}

// ── PlatformPreset ───────────────────────────────────────────────────────────

const KNOWN_PRESETS: &[&str] = &[
    "common", "all", "desktop", "mobile", "linux", "macos", "windows", "android", "wasm",
];

/// A named group of build targets, or a single explicit Rust target triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformPreset(String);

impl PlatformPreset {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` for a named group, `false` for an explicit target triple.
    pub fn is_family(&self) -> bool {
        KNOWN_PRESETS.contains(&self.0.as_str())
    }
}

impl fmt::Display for PlatformPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PlatformPreset {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        if KNOWN_PRESETS.contains(&lower.as_str()) {
            return Ok(Self(lower));
        }

        // target triples: at least arch-vendor-os, ascii alnum/underscore parts
        let parts: Vec<&str> = lower.split('-').collect();
        let looks_like_triple = parts.len() >= 3
            && parts
                .iter()
                .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));

        if looks_like_triple {
            Ok(Self(lower))
        } else {
            Err(DomainError::InvalidSpec(format!(
                "unknown platform preset or target: {s}"
            )))
        }
    }
}
