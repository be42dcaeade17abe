#![deny(missing_docs)]

//! # Resolver Factory
//!
//! Entry point for callers holding a Swagger document: looks up a definition
//! or an operation and hands its schema to the builder.

use crate::builder::SchemaResolverBuilder;
use crate::config::ResolverConfig;
use crate::error::AppResult;
use crate::oas::configuration::SwaggerConfiguration;
use crate::oas::loader::ConfigurationLoader;
use crate::oas::merger::ParameterMerger;
use crate::resolver::Resolver;
use tracing::debug;

/// Builds resolvers for definitions and operations of one document.
#[derive(Clone)]
pub struct ResolverFactory {
    configuration: SwaggerConfiguration,
    builder: SchemaResolverBuilder,
}

impl ResolverFactory {
    /// Combines a document lookup with a builder.
    pub fn new(configuration: SwaggerConfiguration, builder: SchemaResolverBuilder) -> Self {
        ResolverFactory {
            configuration,
            builder,
        }
    }

    /// Loads the document through `loader` and wires everything from `config`.
    pub fn from_config(
        loader: &dyn ConfigurationLoader,
        config: &ResolverConfig,
    ) -> AppResult<Self> {
        let merger = ParameterMerger::new(config.path_merge_strategy);
        let configuration = SwaggerConfiguration::load(loader, merger)?;
        Ok(Self::new(configuration, SchemaResolverBuilder::from_config(config)))
    }

    /// The document lookup layer.
    pub fn configuration(&self) -> &SwaggerConfiguration {
        &self.configuration
    }

    /// Resolver for the named definition.
    pub fn create_for_definition(&self, name: &str) -> AppResult<Resolver> {
        debug!(definition = name, "creating resolver for definition");
        let definition = self.configuration.definition(name)?;
        self.builder.build(definition, name)
    }

    /// Resolver for the parameters of `method` on `route`.
    pub fn create_for_request(&self, route: &str, method: &str) -> AppResult<Resolver> {
        let name = format!("{} {}", method.to_uppercase(), route);
        debug!(operation = %name, "creating resolver for request");
        let schema = self.configuration.path_definition(route, method)?;
        self.builder.build(&schema, &name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::oas::loader::{parse_document, DocumentFormat};
    use crate::oas::merger::MergeStrategy;
    use serde_json::{json, Map, Value};

    const DOC: &str = r#"
definitions:
  Pet:
    required: [name]
    properties:
      name:
        type: string
      tag:
        type: string
  Broken:
    properties:
      upload:
        type: file
paths:
  /pets/{id}:
    parameters:
      - name: id
        in: path
        required: true
        type: integer
    get:
      parameters:
        - name: verbose
          in: query
          type: boolean
    put:
      parameters:
        - name: doc
          in: formData
          type: file
"#;

    fn factory() -> ResolverFactory {
        let document = parse_document(DOC, DocumentFormat::Yaml).unwrap();
        ResolverFactory::new(
            SwaggerConfiguration::new(document, ParameterMerger::new(MergeStrategy::Strict)),
            SchemaResolverBuilder::from_config(&ResolverConfig::default()),
        )
    }

    fn input(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_create_for_definition() {
        let resolver = factory().create_for_definition("models::Pet").unwrap();
        assert!(resolver.is_required("name"));
        assert_eq!(
            resolver.resolve(&input(json!({"name": "Rex"}))).unwrap(),
            input(json!({"name": "Rex", "tag": null}))
        );
    }

    #[test]
    fn test_create_for_request_normalizes_strings() {
        let resolver = factory().create_for_request("/pets/{id}", "get").unwrap();
        assert_eq!(
            resolver
                .resolve(&input(json!({"id": "3", "verbose": "true"})))
                .unwrap(),
            input(json!({"id": 3, "verbose": true}))
        );
    }

    #[test]
    fn test_request_errors_name_the_operation() {
        let err = factory().create_for_request("/pets/{id}", "put").unwrap_err();
        match err {
            AppError::UndefinedPropertyType { definition, ty, .. } => {
                assert_eq!(definition, "PUT /pets/{id}");
                assert_eq!(ty, "file");
            }
            other => panic!("unexpected error {}", other),
        }
    }

    #[test]
    fn test_lookup_failures() {
        let f = factory();
        assert!(matches!(
            f.create_for_definition("Dog"),
            Err(AppError::DefinitionNotFound(_))
        ));
        assert!(matches!(
            f.create_for_request("/owners", "get"),
            Err(AppError::PathNotFound(_))
        ));
        assert!(matches!(
            f.create_for_request("/pets/{id}", "delete"),
            Err(AppError::OperationNotFound { .. })
        ));
    }
}
