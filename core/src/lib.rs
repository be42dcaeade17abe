#![deny(missing_docs)]

//! # OAS Resolver Core
//!
//! Builds validating, normalizing resolvers from Swagger 2.0 schema
//! definitions and operation parameter lists.
//!
//! A resolver is built once per definition (or per route/method pair) and
//! then reused for every input:
//!
//! ```no_run
//! use oas_resolver_core::{FileLoader, ResolverConfig, ResolverFactory};
//! use serde_json::json;
//!
//! # fn main() -> oas_resolver_core::AppResult<()> {
//! let factory = ResolverFactory::from_config(
//!     &FileLoader::new("docs/swagger.yaml"),
//!     &ResolverConfig::default(),
//! )?;
//! let resolver = factory.create_for_request("/pets/{id}", "get")?;
//! let mut input = serde_json::Map::new();
//! input.insert("id".to_string(), json!("42"));
//! let resolved = resolver.resolve(&input)?;
//! assert_eq!(resolved["id"], json!(42));
//! # Ok(())
//! # }
//! ```

/// Shared error types.
pub mod error;

/// Resolver settings.
pub mod config;

/// Swagger 2.0 document model, loading and parameter merging.
pub mod oas;

/// Raw value normalizers.
pub mod normalizer;

/// Cross-cutting validators.
pub mod validator;

/// Declarations and the runtime resolver.
pub mod resolver;

/// Schema to resolver construction.
pub mod builder;

/// Document-backed resolver construction.
pub mod factory;

pub use builder::SchemaResolverBuilder;
pub use config::ResolverConfig;
pub use error::{AppError, AppResult, ValidationError};
pub use factory::ResolverFactory;
pub use normalizer::{
    default_normalizers, BooleanNormalizer, IntegerNormalizer, NormalizeFn, NumberNormalizer,
    SchemaNormalizer,
};
pub use oas::{
    infer_allowed_types, parse_document, ConfigurationLoader, DocumentFormat, FileLoader,
    MergeStrategy, ParamLocation, ParameterMerger, SchemaNode, SwaggerConfiguration,
    SwaggerDocument, TypeSet, TypeTag,
};
pub use resolver::{DeclarationBuilder, PropertyDeclaration, Resolver};
pub use validator::{
    default_validators, ArrayItemsValidator, NumberRangeValidator, PatternValidator,
    SchemaValidator, StringLengthValidator,
};
