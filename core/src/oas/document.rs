#![deny(missing_docs)]

//! # Swagger Document Model
//!
//! Local shims for the parts of a Swagger 2.0 document the resolver needs:
//! `definitions`, `paths` (with their operations and parameters) and the
//! reusable top-level `parameters`.

use crate::oas::schema::{ParamLocation, SchemaNode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// HTTP methods a Path Item may declare, in canonical order.
pub const OPERATION_METHODS: [&str; 7] = [
    "get", "put", "post", "delete", "options", "head", "patch",
];

/// Root of a Swagger 2.0 document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwaggerDocument {
    /// Swagger version string (e.g. "2.0").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swagger: Option<String>,
    /// Named reusable schemas.
    #[serde(default)]
    pub definitions: IndexMap<String, SchemaNode>,
    /// Routes keyed by path template.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    /// Named reusable parameters.
    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,
}

/// Operations and shared parameters of one route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// Parameters shared by every operation of the route.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// GET operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// PUT operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// POST operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// DELETE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// OPTIONS operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// HEAD operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    /// PATCH operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
}

impl PathItem {
    /// Looks up an operation by method name (case-insensitive).
    pub fn operation(&self, method: &str) -> Option<&Operation> {
        match method.to_ascii_lowercase().as_str() {
            "get" => self.get.as_ref(),
            "put" => self.put.as_ref(),
            "post" => self.post.as_ref(),
            "delete" => self.delete.as_ref(),
            "options" => self.options.as_ref(),
            "head" => self.head.as_ref(),
            "patch" => self.patch.as_ref(),
            _ => None,
        }
    }

    /// Declared operations as `(method, operation)`, in canonical order.
    pub fn operations(&self) -> Vec<(&'static str, &Operation)> {
        OPERATION_METHODS
            .iter()
            .filter_map(|m| self.operation(m).map(|op| (*m, op)))
            .collect()
    }
}

/// One HTTP operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Unique operation identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Operation-level parameters.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

/// A Swagger 2.0 Parameter Object, or a `$ref` to one.
///
/// Non-body parameters describe their value inline with the same keywords as
/// a Schema Object; those are captured in `fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Name of the parameter. Empty for `$ref` parameters.
    #[serde(default)]
    pub name: String,
    /// Location of the parameter.
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ParamLocation>,
    /// Whether the parameter is required.
    #[serde(default)]
    pub required: bool,
    /// Body schema (only for `in: body`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaNode>,
    /// Inline schema keywords (type, format, items, collectionFormat, ...)
    /// and the `$ref` of a Reference Object.
    #[serde(flatten)]
    pub fields: SchemaNode,
}

impl Parameter {
    /// The `$ref` of a Reference Object parameter.
    pub fn reference(&self) -> Option<&str> {
        if self.name.is_empty() {
            self.fields.reference.as_deref()
        } else {
            None
        }
    }
}
