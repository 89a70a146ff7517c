#![deny(missing_docs)]

//! # Clientgen CLI
//!
//! Command Line Interface for the Swagger client generator.
//!
//! Supported Commands:
//! - `generate`: Generate a `SwaggerClient` subclass for a given Swagger spec.
//!
//! Generated code goes to stdout (or `--output`); logs go to stderr.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{CliError, CliResult};

mod error;
mod generate;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Swagger client generator")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level).
    #[clap(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a SwaggerClient subclass for a given Swagger spec.
    Generate(generate::GenerateArgs),
}

/// Sets up tracing on stderr; `RUST_LOG` wins unless `--verbose` is given.
fn init_logging(verbose: bool) -> CliResult<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}

fn run(cli: Cli) -> CliResult<()> {
    init_logging(cli.verbose)?;

    match &cli.command {
        Commands::Generate(args) => generate::execute(args)?,
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "generation failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
