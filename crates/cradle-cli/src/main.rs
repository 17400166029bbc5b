//! `cradle`: scaffold Node packages whose native module is written in Rust.
//!
//! Startup: `.env`, argument parsing, logging, configuration, then the
//! subcommand. Failures are printed on stderr and mapped to exit codes:
//!
//! | Code | Meaning                           |
//! |------|-----------------------------------|
//! |  0   | Success                           |
//! |  1   | Internal error, failed `npm init` |
//! |  2   | Bad usage, name or target dir     |
//! |  3   | Template not found                |
//! |  4   | Configuration error               |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // absent .env is fine
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too, on stdout
            let _ = e.print();
            return ExitCode::from(if e.use_stderr() { 2 } else { 0 });
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    let verbose = cli.global.verbose > 0;
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.log();
            eprint!("{}", err.report(verbose, std::io::stderr().is_terminal()));
            ExitCode::from(err.exit_code())
        }
    }
}

#[instrument(skip_all)]
fn run(cli: Cli) -> CliResult<()> {
    let config =
        AppConfig::load(cli.global.config.as_ref()).map_err(|e| CliError::ConfigError {
            message: format!("{e:#}"),
            source: None,
        })?;
    debug!(?config, "Configuration loaded");

    let output = OutputManager::new(&cli.global, &config);

    match cli.command {
        Commands::New(cmd) => commands::new::execute(cmd, cli.global, config, output),
        Commands::List(cmd) => commands::list::execute(cmd, config, output),
        Commands::Init(cmd) => commands::init::execute(cmd, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}
