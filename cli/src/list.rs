#![deny(missing_docs)]

//! # List Command
//!
//! Prints every definition and operation a resolver can be built for.

use std::path::PathBuf;

use oas_resolver_core::ResolverConfig;
use serde::Serialize;

use crate::error::CliResult;
use crate::output::{render, OutputFormat};
use crate::target::load_factory;

/// Arguments for the list command.
#[derive(clap::Args, Debug, Clone)]
pub struct ListArgs {
    /// Path to the Swagger 2.0 document.
    #[clap(long)]
    pub spec: PathBuf,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct Listing<'a> {
    definitions: Vec<&'a str>,
    operations: Vec<String>,
}

/// Executes the listing and returns the rendered output.
pub fn execute(args: &ListArgs, config: &ResolverConfig) -> CliResult<String> {
    let factory = load_factory(&args.spec, config)?;
    let configuration = factory.configuration();

    let listing = Listing {
        definitions: configuration.definition_names(),
        operations: configuration
            .operations()
            .into_iter()
            .map(|(route, method)| format!("{} {}", method.to_uppercase(), route))
            .collect(),
    };

    render(&listing, args.format)
}
