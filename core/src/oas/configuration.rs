#![deny(missing_docs)]

//! # Swagger Configuration
//!
//! Lookup layer over a loaded document: finds definitions by (possibly
//! module-qualified) name and produces merged parameter schemas for
//! route/method pairs.

use crate::error::{AppError, AppResult};
use crate::oas::document::SwaggerDocument;
use crate::oas::loader::ConfigurationLoader;
use crate::oas::merger::ParameterMerger;
use crate::oas::schema::SchemaNode;

/// A loaded Swagger document plus the merger used for operations.
#[derive(Debug, Clone)]
pub struct SwaggerConfiguration {
    document: SwaggerDocument,
    merger: ParameterMerger,
}

impl SwaggerConfiguration {
    /// Wraps an already parsed document.
    pub fn new(document: SwaggerDocument, merger: ParameterMerger) -> Self {
        SwaggerConfiguration { document, merger }
    }

    /// Loads the document through `loader`.
    pub fn load(loader: &dyn ConfigurationLoader, merger: ParameterMerger) -> AppResult<Self> {
        Ok(Self::new(loader.load_document()?, merger))
    }

    /// The underlying document.
    pub fn document(&self) -> &SwaggerDocument {
        &self.document
    }

    /// Returns the definition named `name`.
    ///
    /// Module-qualified names (`models::Pet`, `App\Entity\Pet`) are reduced
    /// to their last segment first.
    pub fn definition(&self, name: &str) -> AppResult<&SchemaNode> {
        let short = short_name(name);
        self.document
            .definitions
            .get(short)
            .ok_or_else(|| AppError::DefinitionNotFound(short.to_string()))
    }

    /// Returns the merged parameter schema of `method` on `route`.
    pub fn path_definition(&self, route: &str, method: &str) -> AppResult<SchemaNode> {
        let path_item = self
            .document
            .paths
            .get(route)
            .ok_or_else(|| AppError::PathNotFound(route.to_string()))?;

        let operation =
            path_item
                .operation(method)
                .ok_or_else(|| AppError::OperationNotFound {
                    path: route.to_string(),
                    method: method.to_string(),
                })?;

        self.merger.merge(path_item, operation, &self.document)
    }

    /// Names of all definitions, in document order.
    pub fn definition_names(&self) -> Vec<&str> {
        self.document.definitions.keys().map(String::as_str).collect()
    }

    /// All `(route, method)` pairs, in document order.
    pub fn operations(&self) -> Vec<(&str, &'static str)> {
        self.document
            .paths
            .iter()
            .flat_map(|(route, item)| {
                item.operations()
                    .into_iter()
                    .map(move |(method, _)| (route.as_str(), method))
            })
            .collect()
    }
}

fn short_name(name: &str) -> &str {
    name.rsplit("::")
        .next()
        .and_then(|n| n.rsplit('\\').next())
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::loader::{parse_document, DocumentFormat};
    use crate::oas::merger::MergeStrategy;

    fn configuration() -> SwaggerConfiguration {
        let doc = parse_document(
            r#"
definitions:
  Pet:
    properties:
      name:
        type: string
paths:
  /pets:
    get:
      parameters:
        - name: limit
          in: query
          type: integer
    post: {}
"#,
            DocumentFormat::Yaml,
        )
        .unwrap();
        SwaggerConfiguration::new(doc, ParameterMerger::new(MergeStrategy::Strict))
    }

    #[test]
    fn test_definition_lookup_strips_module_path() {
        let config = configuration();
        assert!(config.definition("Pet").is_ok());
        assert!(config.definition("crate::models::Pet").is_ok());
        assert!(config.definition("App\\Entity\\Pet").is_ok());
    }

    #[test]
    fn test_definition_not_found() {
        let err = configuration().definition("models::Dog").unwrap_err();
        assert!(matches!(err, AppError::DefinitionNotFound(name) if name == "Dog"));
    }

    #[test]
    fn test_path_definition_is_case_insensitive_on_method() {
        let merged = configuration().path_definition("/pets", "GET").unwrap();
        assert!(merged.properties.contains_key("limit"));
    }

    #[test]
    fn test_path_and_operation_not_found() {
        let config = configuration();
        assert!(matches!(
            config.path_definition("/dogs", "get"),
            Err(AppError::PathNotFound(_))
        ));
        assert!(matches!(
            config.path_definition("/pets", "delete"),
            Err(AppError::OperationNotFound { .. })
        ));
    }

    #[test]
    fn test_listings() {
        let config = configuration();
        assert_eq!(config.definition_names(), vec!["Pet"]);
        assert_eq!(config.operations(), vec![("/pets", "get"), ("/pets", "post")]);
    }
}
