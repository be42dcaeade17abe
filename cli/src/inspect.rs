#![deny(missing_docs)]

//! # Inspect Command
//!
//! Builds a resolver and prints what it declares, without resolving input.

use oas_resolver_core::{Resolver, ResolverConfig, TypeSet};
use serde::Serialize;
use serde_json::Value;

use crate::error::CliResult;
use crate::output::{render, OutputFormat};
use crate::target::{load_factory, TargetArgs};

/// Arguments for the inspect command.
#[derive(clap::Args, Debug, Clone)]
pub struct InspectArgs {
    /// What to build.
    #[clap(flatten)]
    pub target: TargetArgs,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct PropertyReport<'a> {
    name: &'a str,
    required: bool,
    types: &'a TypeSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    allowed_values: Option<&'a [Value]>,
    normalized: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    target: String,
    properties: Vec<PropertyReport<'a>>,
    validators: usize,
}

fn report(target: String, resolver: &Resolver) -> Report<'_> {
    let properties = resolver
        .declarations()
        .map(|(name, declaration)| PropertyReport {
            name,
            required: resolver.is_required(name),
            types: declaration.allowed_types(),
            default: declaration.default_value(),
            allowed_values: declaration.allowed_values(),
            normalized: declaration.has_normalizer(),
        })
        .collect();

    Report {
        target,
        properties,
        validators: resolver.validator_count(),
    }
}

/// Executes the inspection and returns the rendered report.
pub fn execute(args: &InspectArgs, config: &ResolverConfig) -> CliResult<String> {
    let factory = load_factory(&args.target.spec, config)?;
    let resolver = args.target.resolver(&factory)?;
    render(&report(args.target.label(), &resolver), args.format)
}
