//! Command-line grammar for `cradle`.
//!
//! Flag values are parsed into core domain types here (`--bins`,
//! `--platform`); deciding what they mean is left to the commands.

use clap::{Args, Parser, Subcommand, ValueEnum};

use cradle_core::domain::{CachePolicy, PlatformPreset};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "cradle",
    bin_name = "cradle",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold Node packages backed by a Rust native module",
    long_about = "Cradle creates a Node package whose native module is written \
                  in Rust with Neon: package.json, Cargo.toml, the Rust crate, \
                  optional TypeScript sources and CI workflows.",
    after_help = "EXAMPLES:\n\
        \x20 cradle new my-addon\n\
        \x20 cradle new @acme/widget --lib --lang ts --ci github --yes\n\
        \x20 cradle list --format json\n\
        \x20 cradle completions bash > /usr/share/bash-completion/completions/cradle",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new package.
    #[command(
        visible_alias = "n",
        about = "Create a new package",
        after_help = "EXAMPLES:\n\
            \x20 cradle new my-addon\n\
            \x20 cradle new widget --lib --lang ts --platform desktop\n\
            \x20 cradle new @acme/widget --lib --bins npm:@acme/widget- --yes\n\
            \x20 cradle new widget --lib --ci none --dry-run"
    )]
    New(NewArgs),

    /// List available languages and CI providers.
    #[command(
        visible_alias = "ls",
        about = "List languages and CI providers",
        after_help = "EXAMPLES:\n\
            \x20 cradle list\n\
            \x20 cradle list --format json\n\
            \x20 cradle list --templates"
    )]
    List(ListArgs),

    /// Initialise a Cradle configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 cradle init          # per-user config directory\n\
            \x20 cradle init --local  # .cradle.toml in the current directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 cradle completions bash > ~/.local/share/bash-completion/completions/cradle\n\
            \x20 cradle completions zsh  > ~/.zfunc/_cradle\n\
            \x20 cradle completions fish > ~/.config/fish/completions/cradle.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Cradle configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 cradle config get defaults.lang\n\
            \x20 cradle config list\n\
            \x20 cradle config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `cradle new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// npm package name, optionally scoped (`@scope/name`).  The package is
    /// created in `./<name>` without the scope.
    #[arg(value_name = "NAME", help = "npm package name")]
    pub name: String,

    /// Scaffold a library that publishes prebuilt binaries.
    #[arg(long = "lib", help = "Create a library with prebuilt binaries")]
    pub lib: bool,

    /// JavaScript-facing language of the library.
    #[arg(
        short = 'l',
        long = "lang",
        value_name = "LANG",
        value_enum,
        requires = "lib",
        help = "Library language (default from config: ts)"
    )]
    pub lang: Option<LangArg>,

    /// Module system of the library.
    #[arg(
        short = 'm',
        long = "module",
        value_name = "MODULE",
        value_enum,
        requires = "lib",
        help = "Module system (default from config: esm)"
    )]
    pub module: Option<ModuleArg>,

    /// CI provider for build and release workflows.
    #[arg(
        long = "ci",
        value_name = "CI",
        value_enum,
        requires = "lib",
        help = "CI provider, or none (default from config: github)"
    )]
    pub ci: Option<CiArg>,

    /// Where prebuilt binaries are published.
    #[arg(
        long = "bins",
        value_name = "CACHE",
        value_parser = parse_bins,
        requires = "lib",
        help = "Binary cache: npm[:@org[/prefix]] or none (default from config: npm)"
    )]
    pub bins: Option<Bins>,

    /// Platforms to build binaries for.  Repeatable.
    #[arg(
        short = 'p',
        long = "platform",
        value_name = "PLATFORM",
        value_parser = parse_platform,
        requires = "lib",
        help = "Platform preset or Rust target triple (repeatable)"
    )]
    pub platforms: Vec<PlatformPreset>,

    /// Run `npm init` without asking questions.
    #[arg(short = 'y', long = "yes", help = "Accept npm init defaults")]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

/// A parsed `--bins` value: a cache policy, or `none`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bins(pub Option<CachePolicy>);

fn parse_bins(s: &str) -> Result<Bins, String> {
    if s.eq_ignore_ascii_case("none") {
        return Ok(Bins(None));
    }
    s.parse().map(|policy| Bins(Some(policy))).map_err(|e| format!("{e}"))
}

fn parse_platform(s: &str) -> Result<PlatformPreset, String> {
    s.parse().map_err(|e| format!("{e}"))
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `cradle list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Also list every template id the template store can resolve.
    #[arg(long = "templates", help = "List resolvable template ids instead")]
    pub templates: bool,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `cradle init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write `.cradle.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `cradle completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `cradle config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.lang`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the per-user configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Library languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LangArg {
    #[value(alias = "javascript")]
    Js,
    Dts,
    #[value(alias = "typescript")]
    Ts,
}

/// Module systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ModuleArg {
    #[value(alias = "module")]
    Esm,
    #[value(alias = "commonjs")]
    Cjs,
}

/// CI providers, plus `none`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum CiArg {
    #[value(alias = "gh")]
    Github,
    None,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse_new(args: &[&str]) -> NewArgs {
        let mut argv = vec!["cradle", "new"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Commands::New(args) => args,
            other => panic!("expected New command, got {other:?}"),
        }
    }

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn plain_package_has_no_library_options() {
        let args = parse_new(&["my-addon"]);
        assert!(!args.lib);
        assert!(args.lang.is_none());
        assert!(args.platforms.is_empty());
    }

    #[test]
    fn library_options_parse() {
        let args = parse_new(&[
            "@acme/widget",
            "--lib",
            "--lang",
            "typescript",
            "--module",
            "cjs",
            "--ci",
            "none",
            "--bins",
            "npm:@acme/widget-",
            "-p",
            "linux",
            "-p",
            "aarch64-apple-darwin",
            "--yes",
        ]);
        assert!(args.lib && args.yes);
        assert_eq!(args.lang, Some(LangArg::Ts));
        assert_eq!(args.module, Some(ModuleArg::Cjs));
        assert_eq!(args.ci, Some(CiArg::None));
        assert_eq!(
            args.bins,
            Some(Bins(Some("npm:@acme/widget-".parse().unwrap())))
        );
        assert_eq!(args.platforms.len(), 2);
    }

    #[test]
    fn bins_none_disables_cache() {
        let args = parse_new(&["w", "--lib", "--bins", "none"]);
        assert_eq!(args.bins, Some(Bins(None)));
    }

    #[test]
    fn library_options_require_lib() {
        for flag in [
            &["--ci", "github"][..],
            &["--lang", "ts"],
            &["--platform", "linux"],
            &["--bins", "npm"],
        ] {
            let mut argv = vec!["cradle", "new", "w"];
            argv.extend_from_slice(flag);
            assert!(Cli::try_parse_from(argv).is_err(), "{flag:?} accepted without --lib");
        }
    }

    #[test]
    fn bad_platform_and_bins_are_rejected() {
        assert!(Cli::try_parse_from(["cradle", "new", "w", "--lib", "-p", "beos"]).is_err());
        assert!(Cli::try_parse_from(["cradle", "new", "w", "--lib", "--bins", "s3"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["cradle", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
