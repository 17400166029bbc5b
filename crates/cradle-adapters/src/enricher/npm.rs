//! `npm init` as the enrichment step.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{info, instrument};

use cradle_core::application::ports::{EnrichError, EnrichOptions, Enricher};

/// Default program name.
pub const NPM: &str = "npm";

/// Runs `<program> init [--yes]` in the package directory.
///
/// Stdio is inherited so the user can answer npm's questions.
#[derive(Debug, Clone)]
pub struct NpmInitEnricher {
    program: String,
}

impl NpmInitEnricher {
    pub fn new() -> Self {
        Self::with_program(NPM)
    }

    /// Use another npm-compatible executable (`pnpm`, a full path, ...).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn args(options: &EnrichOptions) -> Vec<&'static str> {
        let mut args = vec!["init"];
        if options.unattended {
            args.push("--yes");
        }
        args
    }
}

impl Default for NpmInitEnricher {
    fn default() -> Self {
        Self::new()
    }
}

impl Enricher for NpmInitEnricher {
    #[instrument(skip(self), fields(program = %self.program))]
    fn enrich(&self, dir: &Path, options: &EnrichOptions) -> Result<(), EnrichError> {
        let args = Self::args(options);
        let command = format!("{} {}", self.program, args.join(" "));
        info!(%command, "Running package initializer");

        let status = Command::new(&self.program)
            .args(&args)
            .current_dir(dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| EnrichError::Spawn {
                command: command.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(EnrichError::NonZeroExit {
                command,
                code: status.code(),
            })
        }
    }
}
