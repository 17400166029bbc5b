//! Implementation of the `cradle new` command.
//!
//! Responsibility: translate CLI arguments and configured defaults into a
//! `PackageSpec`, call the core scaffold service, and display results. No
//! business logic lives here.

use std::path::Path;
use std::str::FromStr;

use serde_json::json;
use tracing::{debug, info, instrument};

use cradle_core::{
    application::{ScaffoldPlan, ScaffoldReport},
    domain::{CachePolicy, CiProvider, Lang, LibrarySpec, ModuleType, PackageSpec},
};

use crate::{
    cli::{Bins, CiArg, LangArg, ModuleArg, NewArgs, OutputFormat, global::GlobalArgs},
    config::{AppConfig, Defaults},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `cradle new` command.
///
/// 1. Build the package specification (flags over configured defaults)
/// 2. Resolve the scaffold plan; validation and template lookup fail here
/// 3. `--dry-run` prints the plan and stops
/// 4. Scaffold into `./<name>`, running `npm init` in between
#[instrument(skip_all, fields(package = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let spec = build_spec(&args, &config.defaults)?;
    debug!(?spec, "Package specification resolved");

    let service = super::build_service(&config);
    let parent = Path::new(".");

    if args.dry_run {
        let plan = service.plan(&spec, parent)?;
        return show_plan(&spec, &plan, &output);
    }

    if output.format() != OutputFormat::Json {
        output.header(&format!("Creating '{}'...", spec.name()))?;
    }
    info!(enricher = %config.enrichment.program, "Scaffold started");

    let report = service.scaffold(spec, parent)?;

    if output.format() == OutputFormat::Json {
        output.json(&report_json(&report))?;
        return Ok(());
    }

    output.success(&format!(
        "Package '{}' created in {}",
        report.package.name.as_deref().unwrap_or_default(),
        report.root.display()
    ))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", report.root.display()))?;
        output.print("  npm install")?;
        output.print("  npm run build")?;
    }

    Ok(())
}

// ── Spec construction ─────────────────────────────────────────────────────────

pub(crate) fn build_spec(args: &NewArgs, defaults: &Defaults) -> CliResult<PackageSpec> {
    let mut builder = PackageSpec::builder(args.name.as_str()).unattended(args.yes);

    if args.lib {
        builder = builder.library(build_library(args, defaults)?);
    }

    builder.build().map_err(|e| CliError::Core(e.into()))
}

fn build_library(args: &NewArgs, defaults: &Defaults) -> CliResult<LibrarySpec> {
    let lang = match args.lang {
        Some(lang) => convert_lang(lang),
        None => parse_default::<Lang>("defaults.lang", &defaults.lang)?,
    };
    let module = match args.module {
        Some(module) => convert_module(module),
        None => parse_default::<ModuleType>("defaults.module", &defaults.module)?,
    };
    let ci = match args.ci {
        Some(ci) => convert_ci(ci),
        None => optional_default::<CiProvider>("defaults.ci", &defaults.ci)?,
    };
    let cache = match &args.bins {
        Some(Bins(cache)) => cache.clone(),
        None => optional_default::<CachePolicy>("defaults.cache", &defaults.cache)?,
    };

    Ok(args
        .platforms
        .iter()
        .cloned()
        .fold(
            LibrarySpec::new(lang).module(module).ci(ci).cache(cache),
            LibrarySpec::platform,
        ))
}

/// Parse a configured default, reporting a bad value as a config error.
fn parse_default<T>(key: &str, value: &str) -> CliResult<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.parse().map_err(|e| CliError::ConfigError {
        message: format!("invalid value '{value}' for {key}"),
        source: Some(Box::new(e)),
    })
}

/// Like [`parse_default`], with `none` meaning absent.
fn optional_default<T>(key: &str, value: &str) -> CliResult<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    parse_default(key, value).map(Some)
}

// ── Type conversions CLI → core ───────────────────────────────────────────────

fn convert_lang(lang: LangArg) -> Lang {
    match lang {
        LangArg::Js => Lang::Js,
        LangArg::Dts => Lang::Dts,
        LangArg::Ts => Lang::Ts,
    }
}

fn convert_module(module: ModuleArg) -> ModuleType {
    match module {
        ModuleArg::Esm => ModuleType::Esm,
        ModuleArg::Cjs => ModuleType::Cjs,
    }
}

fn convert_ci(ci: CiArg) -> Option<CiProvider> {
    match ci {
        CiArg::Github => Some(CiProvider::GitHub),
        CiArg::None => None,
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_plan(spec: &PackageSpec, plan: &ScaffoldPlan, out: &OutputManager) -> CliResult<()> {
    if out.format() == OutputFormat::Json {
        out.json(&json!({
            "root": plan.root,
            "manifestTemplates": plan.manifest_templates,
            "files": plan.destinations(),
        }))?;
        return Ok(());
    }

    out.info(&format!(
        "Dry run: would create '{}' at {}",
        spec.name(),
        plan.root.display()
    ))?;
    if let Some(lib) = spec.library() {
        out.print(&format!("  Language:  {}", lib.lang))?;
        out.print(&format!("  Module:    {}", lib.module))?;
        out.print(&format!(
            "  CI:        {}",
            lib.ci.map_or("none".to_string(), |ci| ci.to_string())
        ))?;
        out.print(&format!(
            "  Binaries:  {}",
            lib.cache.as_ref().map_or("none".to_string(), |c| c.to_string())
        ))?;
    }
    out.print("")?;
    out.print("Files:")?;
    for path in plan.destinations() {
        out.print(&format!("  {}", path.display()))?;
    }
    Ok(())
}

fn report_json(report: &ScaffoldReport) -> serde_json::Value {
    json!({
        "root": report.root,
        "package": report.package,
        "written": report.written,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
