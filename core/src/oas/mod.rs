#![deny(missing_docs)]

//! # OpenAPI (Swagger 2.0) Module
//!
//! - **schema**: Schema Object shim and parameter locations.
//! - **document**: Document, path, operation and parameter shims.
//! - **types**: Type inference (schema shape -> admissible type tags).
//! - **loader**: Reading documents from files or memory.
//! - **merger**: Folding operation parameters into one schema.
//! - **configuration**: Definition and route lookup over a loaded document.

pub mod configuration;
pub mod document;
pub mod loader;
pub mod merger;
pub mod ref_utils;
pub mod schema;
pub mod types;

pub use configuration::SwaggerConfiguration;
pub use document::{Operation, Parameter, PathItem, SwaggerDocument};
pub use loader::{parse_document, ConfigurationLoader, DocumentFormat, FileLoader};
pub use merger::{MergeStrategy, ParameterMerger};
pub use ref_utils::ref_target_name;
pub use schema::{ParamLocation, SchemaNode};
pub use types::{infer_allowed_types, TypeSet, TypeTag};
