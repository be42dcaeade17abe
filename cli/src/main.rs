#![deny(missing_docs)]

//! # OAS Resolver CLI
//!
//! Command Line Interface for exercising resolvers built from a Swagger 2.0
//! document.
//!
//! Supported Commands:
//! - `list`: Definitions and operations found in the document.
//! - `inspect`: Declarations of one resolver (types, defaults, enums).
//! - `validate`: Resolves a JSON object or query string and prints the result.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use oas_resolver_core::ResolverConfig;
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;

mod error;
mod input;
mod inspect;
mod list;
mod output;
mod target;
mod validate;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI resolver CLI")]
struct Cli {
    /// Log build and resolve steps (overridden by `RUST_LOG`).
    #[clap(long, short, global = true)]
    verbose: bool,

    /// YAML resolver configuration.
    #[clap(long, env = "OAS_RESOLVER_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List definitions and operations of a document.
    List(list::ListArgs),
    /// Show what a resolver declares.
    Inspect(inspect::InspectArgs),
    /// Resolve input against a definition or operation.
    Validate(validate::ValidateArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> CliResult<ResolverConfig> {
    match path {
        Some(path) => Ok(ResolverConfig::load(path)?),
        None => Ok(ResolverConfig::default()),
    }
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_ref())?;

    let output = match &cli.command {
        Commands::List(args) => list::execute(args, &config)?,
        Commands::Inspect(args) => inspect::execute(args, &config)?,
        Commands::Validate(args) => validate::execute(args, &config)?,
    };
    println!("{}", output);

    Ok(())
}
