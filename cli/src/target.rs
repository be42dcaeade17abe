#![deny(missing_docs)]

//! # Resolver Targets
//!
//! Arguments shared by `inspect` and `validate`: which document to load and
//! which definition or operation to build a resolver for.

use std::path::{Path, PathBuf};

use oas_resolver_core::{FileLoader, Resolver, ResolverConfig, ResolverFactory};

use crate::error::CliResult;

/// Loads the document at `spec` and wires a factory from `config`.
pub fn load_factory(spec: &Path, config: &ResolverConfig) -> CliResult<ResolverFactory> {
    Ok(ResolverFactory::from_config(&FileLoader::new(spec), config)?)
}

/// A definition name, or a route/method pair.
#[derive(clap::Args, Debug, Clone)]
pub struct TargetArgs {
    /// Path to the Swagger 2.0 document (`.yaml`, `.yml` or `.json`).
    #[clap(long)]
    pub spec: PathBuf,

    /// Definition name (module prefixes such as `models::` are ignored).
    #[clap(long, conflicts_with_all = ["route", "method"], required_unless_present = "route")]
    pub definition: Option<String>,

    /// Route as written in the document, e.g. `/pets/{id}`.
    #[clap(long, requires = "method")]
    pub route: Option<String>,

    /// HTTP method of the operation.
    #[clap(long, requires = "route")]
    pub method: Option<String>,
}

impl TargetArgs {
    /// Human readable label, matching the name used in build errors.
    pub fn label(&self) -> String {
        match (&self.definition, &self.route, &self.method) {
            (Some(definition), _, _) => definition.clone(),
            (None, Some(route), Some(method)) => format!("{} {}", method.to_uppercase(), route),
            _ => String::new(),
        }
    }

    /// Builds the resolver this target names.
    pub fn resolver(&self, factory: &ResolverFactory) -> CliResult<Resolver> {
        let resolver = match (&self.definition, &self.route, &self.method) {
            (Some(definition), _, _) => factory.create_for_definition(definition)?,
            (None, Some(route), Some(method)) => factory.create_for_request(route, method)?,
            _ => {
                return Err(crate::error::CliError::General(
                    "Either --definition or --route with --method is required".to_string(),
                ))
            }
        };
        Ok(resolver)
    }
}
