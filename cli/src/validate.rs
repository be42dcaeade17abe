#![deny(missing_docs)]

//! # Validate Command
//!
//! Resolves one input against a definition or operation and prints the
//! normalized result.

use oas_resolver_core::ResolverConfig;
use tracing::debug;

use crate::error::CliResult;
use crate::input::InputArgs;
use crate::output::{render, OutputFormat};
use crate::target::{load_factory, TargetArgs};

/// Arguments for the validate command.
#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    /// What to validate against.
    #[clap(flatten)]
    pub target: TargetArgs,

    /// The values to resolve.
    #[clap(flatten)]
    pub input: InputArgs,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Executes the validation and returns the rendered, resolved values.
pub fn execute(args: &ValidateArgs, config: &ResolverConfig) -> CliResult<String> {
    let input = args.input.read()?;
    let factory = load_factory(&args.target.spec, config)?;
    let resolver = args.target.resolver(&factory)?;

    debug!(resolver = %args.target.label(), keys = input.len(), "resolving input");
    let resolved = resolver.resolve(&input)?;
    render(&resolved, args.format)
}
