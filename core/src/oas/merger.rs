#![deny(missing_docs)]

//! # Operation Parameter Merging
//!
//! Folds the path-level and operation-level parameters of one operation into
//! a single object schema that a resolver can be built from.
//!
//! Every merged property records where it came from in
//! [`SchemaNode::location`]. The location label is also written to `title`,
//! which is how older consumers recognize the location.

use crate::error::{AppError, AppResult};
use crate::oas::document::{Operation, Parameter, PathItem, SwaggerDocument};
use crate::oas::ref_utils::{extract_section_name, ref_target_name};
use crate::oas::schema::{ParamLocation, SchemaNode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What to do when two parameters of one operation produce the same property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// Fail with [`AppError::ParameterCollision`].
    #[default]
    Strict,
    /// The parameter merged last wins.
    Replace,
}

/// Merges an operation's parameters into one object schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterMerger {
    strategy: MergeStrategy,
}

impl ParameterMerger {
    /// Creates a merger using `strategy` for name collisions.
    pub fn new(strategy: MergeStrategy) -> Self {
        ParameterMerger { strategy }
    }

    /// Builds the combined schema of `operation` on `path_item`.
    ///
    /// Operation parameters override path-level parameters with the same
    /// name and location, as Swagger prescribes. Collisions between
    /// different locations go through the configured [`MergeStrategy`].
    pub fn merge(
        &self,
        path_item: &PathItem,
        operation: &Operation,
        document: &SwaggerDocument,
    ) -> AppResult<SchemaNode> {
        let mut effective: IndexMap<(String, Option<ParamLocation>), Parameter> = IndexMap::new();
        for param in path_item.parameters.iter().chain(operation.parameters.iter()) {
            let param = resolve_parameter(param, document)?;
            effective.insert((param.name.clone(), param.location), param);
        }

        let mut merged = SchemaNode::typed("object");
        for param in effective.into_values() {
            if param.location == Some(ParamLocation::Body) {
                self.merge_body(&mut merged, param, document)?;
            } else {
                let property = parameter_property(&param);
                self.insert(&mut merged, param.name, property, param.required)?;
            }
        }

        debug!(
            operation = operation.operation_id.as_deref().unwrap_or("<anonymous>"),
            properties = merged.properties.len(),
            required = merged.required.len(),
            "merged operation parameters"
        );

        Ok(merged)
    }

    fn merge_body(
        &self,
        merged: &mut SchemaNode,
        param: Parameter,
        document: &SwaggerDocument,
    ) -> AppResult<()> {
        let Some(schema) = param.schema else {
            return Err(AppError::General(format!(
                "Body parameter '{}' declares no schema",
                param.name
            )));
        };

        let schema = match schema.reference.as_deref() {
            Some(reference) if schema.schema_type.is_none() => {
                find_definition(document, reference)?.clone()
            }
            _ => schema,
        };

        if schema.properties.is_empty() {
            let property = tag_location(schema, ParamLocation::Body);
            return self.insert(merged, param.name, property, param.required);
        }

        let required = schema.required;
        for (name, property) in schema.properties {
            let is_required = required.contains(&name);
            let property = tag_location(property, ParamLocation::Body);
            self.insert(merged, name, property, is_required)?;
        }

        Ok(())
    }

    fn insert(
        &self,
        merged: &mut SchemaNode,
        name: String,
        property: SchemaNode,
        required: bool,
    ) -> AppResult<()> {
        if merged.properties.contains_key(&name) {
            match self.strategy {
                MergeStrategy::Strict => return Err(AppError::ParameterCollision { name }),
                MergeStrategy::Replace => {
                    warn!(%name, "replacing previously merged parameter");
                    merged.required.retain(|r| r != &name);
                }
            }
        }

        if required {
            merged.required.push(name.clone());
        }
        merged.properties.insert(name, property);
        Ok(())
    }
}

/// Looks up a definition by `$ref` (`#/definitions/Name`) or bare name.
pub(crate) fn find_definition<'a>(
    document: &'a SwaggerDocument,
    reference: &str,
) -> AppResult<&'a SchemaNode> {
    let name = extract_section_name(reference, "definitions")
        .unwrap_or_else(|| ref_target_name(reference));
    document
        .definitions
        .get(&name)
        .ok_or(AppError::DefinitionNotFound(name))
}

fn resolve_parameter(param: &Parameter, document: &SwaggerDocument) -> AppResult<Parameter> {
    let Some(reference) = param.reference() else {
        return Ok(param.clone());
    };

    extract_section_name(reference, "parameters")
        .and_then(|name| document.parameters.get(&name))
        .cloned()
        .ok_or_else(|| {
            AppError::General(format!(
                "Parameter reference '{}' could not be resolved",
                reference
            ))
        })
}

fn parameter_property(param: &Parameter) -> SchemaNode {
    let mut property = param.fields.clone();
    property.reference = None;
    property.required = Vec::new();
    match param.location {
        Some(location) => tag_location(property, location),
        None => property,
    }
}

fn tag_location(mut property: SchemaNode, location: ParamLocation) -> SchemaNode {
    property.location = Some(location);
    property.title = Some(location.to_string());
    property
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::loader::{parse_document, DocumentFormat};

    const DOC: &str = r##"
swagger: "2.0"
parameters:
  Limit:
    name: limit
    in: query
    type: integer
    default: 20
definitions:
  Pet:
    type: object
    required: [name]
    properties:
      name:
        type: string
      tag:
        type: string
paths:
  /pets/{id}:
    parameters:
      - name: id
        in: path
        required: true
        type: string
    get:
      parameters:
        - name: id
          in: path
          required: true
          type: integer
        - $ref: "#/parameters/Limit"
    put:
      parameters:
        - name: pet
          in: body
          required: true
          schema:
            $ref: "#/definitions/Pet"
    post:
      parameters:
        - name: id
          in: query
          type: string
    patch:
      parameters:
        - name: names
          in: body
          schema:
            type: array
            items:
              type: string
    delete:
      parameters:
        - $ref: "#/parameters/Missing"
"##;

    fn doc() -> SwaggerDocument {
        parse_document(DOC, DocumentFormat::Yaml).unwrap()
    }

    fn merge(method: &str, strategy: MergeStrategy) -> AppResult<SchemaNode> {
        let doc = doc();
        let item = &doc.paths["/pets/{id}"];
        ParameterMerger::new(strategy).merge(item, item.operation(method).unwrap(), &doc)
    }

    #[test]
    fn test_operation_parameter_overrides_path_parameter() {
        let merged = merge("get", MergeStrategy::Strict).unwrap();
        let id = &merged.properties["id"];
        assert_eq!(id.schema_type.as_deref(), Some("integer"));
        assert_eq!(id.location, Some(ParamLocation::Path));
        assert_eq!(id.title.as_deref(), Some("path"));
        assert_eq!(merged.required, vec!["id".to_string()]);
    }

    #[test]
    fn test_reference_parameter_is_resolved() {
        let merged = merge("get", MergeStrategy::Strict).unwrap();
        let limit = &merged.properties["limit"];
        assert_eq!(limit.location, Some(ParamLocation::Query));
        assert_eq!(limit.default, Some(serde_json::json!(20)));
        assert!(!merged.is_required("limit"));
    }

    #[test]
    fn test_body_reference_is_expanded() {
        let merged = merge("put", MergeStrategy::Strict).unwrap();
        let names: Vec<&str> = merged.properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["id", "name", "tag"]);
        assert!(merged.is_required("name"));
        assert!(!merged.is_required("tag"));
        assert_eq!(merged.properties["name"].location, Some(ParamLocation::Body));
    }

    #[test]
    fn test_non_object_body_becomes_single_property() {
        let merged = merge("patch", MergeStrategy::Strict).unwrap();
        let names = &merged.properties["names"];
        assert_eq!(names.schema_type.as_deref(), Some("array"));
        assert_eq!(names.location, Some(ParamLocation::Body));
    }

    #[test]
    fn test_strict_collision_fails() {
        let err = merge("post", MergeStrategy::Strict).unwrap_err();
        assert!(matches!(err, AppError::ParameterCollision { ref name } if name == "id"));
    }

    #[test]
    fn test_replace_collision_last_wins() {
        let merged = merge("post", MergeStrategy::Replace).unwrap();
        let id = &merged.properties["id"];
        assert_eq!(id.location, Some(ParamLocation::Query));
        assert!(!merged.is_required("id"));
    }

    #[test]
    fn test_unresolved_reference_fails() {
        let err = merge("delete", MergeStrategy::Strict).unwrap_err();
        assert!(matches!(err, AppError::General(_)));
    }

    #[test]
    fn test_find_definition_by_ref_or_name() {
        let doc = doc();
        assert!(find_definition(&doc, "#/definitions/Pet").is_ok());
        assert!(find_definition(&doc, "Pet").is_ok());
        assert!(matches!(
            find_definition(&doc, "#/definitions/Dog"),
            Err(AppError::DefinitionNotFound(name)) if name == "Dog"
        ));
    }
}
