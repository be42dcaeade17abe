#![deny(missing_docs)]

//! # Schema Nodes
//!
//! A local shim for the Swagger 2.0 Schema Object subset the resolver builder
//! understands. `type` is kept as the raw string so that unrecognized shapes
//! can be reported verbatim.
//!
//! ## Parameter location
//!
//! Upstream mergers historically smuggled the parameter location (`path`,
//! `query`, ...) through the human-readable `title` field. Nodes now carry it
//! explicitly in `x-parameter-location`; [`SchemaNode::parameter_location`]
//! still falls back to `title` so documents produced by older mergers keep
//! their normalization behaviour.

use derive_more::Display;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// The source location of an operation parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum ParamLocation {
    /// URL Path parameter (e.g. /users/{id})
    #[serde(rename = "path")]
    #[display("path")]
    Path,
    /// URL Query parameter (e.g. /users?page=1)
    #[serde(rename = "query")]
    #[display("query")]
    Query,
    /// Request header.
    #[serde(rename = "header")]
    #[display("header")]
    Header,
    /// Form field (`application/x-www-form-urlencoded` or multipart).
    #[serde(rename = "formData")]
    #[display("formData")]
    FormData,
    /// Request body.
    #[serde(rename = "body")]
    #[display("body")]
    Body,
}

impl FromStr for ParamLocation {
    type Err = String;

    /// Parses a location label. Matching is exact and case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path" => Ok(ParamLocation::Path),
            "query" => Ok(ParamLocation::Query),
            "header" => Ok(ParamLocation::Header),
            "formData" => Ok(ParamLocation::FormData),
            "body" => Ok(ParamLocation::Body),
            other => Err(format!("Unknown parameter location '{}'", other)),
        }
    }
}

/// A Swagger 2.0 Schema Object (or the schema-shaped part of a Parameter Object).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// Primitive type (string, integer, boolean, number, array, object).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Format modifier (e.g. int64, date-time).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Display label. See the module docs for its legacy location role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Named child properties, in declaration order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaNode>,
    /// Names of the required child properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Default literal. A JSON `null` default deserializes to `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Allowed literals.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Delimited serialization of an array (csv, ssv, tsv, pipes, multi).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<String>,
    /// Array item schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    /// Reference to another named schema (e.g. `#/definitions/Pet`).
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Explicit parameter location, set by the parameter merger.
    #[serde(
        rename = "x-parameter-location",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<ParamLocation>,

    /// Minimum string length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Maximum string length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// ECMA-style regular expression a string must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Inclusive lower bound, unless `exclusive_minimum` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Inclusive upper bound, unless `exclusive_maximum` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Swagger 2.0 boolean form of `exclusiveMinimum`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub exclusive_minimum: bool,
    /// Swagger 2.0 boolean form of `exclusiveMaximum`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub exclusive_maximum: bool,
    /// Value must be an integral multiple of this number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
    /// Minimum number of array items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    /// Maximum number of array items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    /// Array items must be pairwise distinct.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unique_items: bool,
}

impl SchemaNode {
    /// Creates a node with the given primitive type.
    pub fn typed(schema_type: &str) -> Self {
        SchemaNode {
            schema_type: Some(schema_type.to_string()),
            ..Default::default()
        }
    }

    /// Creates a reference node (no `type`).
    pub fn reference(target: &str) -> Self {
        SchemaNode {
            reference: Some(target.to_string()),
            ..Default::default()
        }
    }

    /// Location of the parameter this node was merged from.
    ///
    /// Prefers the explicit attribute; falls back to parsing `title`.
    pub fn parameter_location(&self) -> Option<ParamLocation> {
        self.location
            .or_else(|| self.title.as_deref().and_then(|t| t.parse().ok()))
    }

    /// Whether `name` appears in this node's `required` list.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// The delimiter used by `collectionFormat`, if the node declares a
    /// delimited format. `multi` repeats the key instead and has none.
    pub fn collection_delimiter(&self) -> Option<char> {
        match self.collection_format.as_deref()? {
            "csv" => Some(','),
            "ssv" => Some(' '),
            "tsv" => Some('\t'),
            "pipes" => Some('|'),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_swagger_property() {
        let node: SchemaNode = serde_yaml::from_str(
            r#"
type: array
collectionFormat: csv
items:
  type: string
minItems: 1
uniqueItems: true
"#,
        )
        .unwrap();

        assert_eq!(node.schema_type.as_deref(), Some("array"));
        assert_eq!(node.collection_delimiter(), Some(','));
        assert_eq!(node.min_items, Some(1));
        assert!(node.unique_items);
        assert_eq!(node.items.unwrap().schema_type.as_deref(), Some("string"));
    }

    #[test]
    fn test_properties_keep_declaration_order() {
        let node: SchemaNode = serde_json::from_value(json!({
            "properties": {
                "zeta": {"type": "string"},
                "alpha": {"type": "integer"},
                "mid": {"$ref": "#/definitions/Mid"}
            },
            "required": ["alpha"]
        }))
        .unwrap();

        let names: Vec<&str> = node.properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert!(node.is_required("alpha"));
        assert!(!node.is_required("zeta"));
        assert_eq!(
            node.properties["mid"].reference.as_deref(),
            Some("#/definitions/Mid")
        );
    }

    #[test]
    fn test_null_default_is_absent() {
        let node: SchemaNode =
            serde_json::from_value(json!({"type": "string", "default": null})).unwrap();
        assert!(node.default.is_none());
    }

    #[test]
    fn test_location_prefers_explicit_attribute() {
        let mut node = SchemaNode::typed("integer");
        node.title = Some("query".into());
        assert_eq!(node.parameter_location(), Some(ParamLocation::Query));

        node.location = Some(ParamLocation::Path);
        assert_eq!(node.parameter_location(), Some(ParamLocation::Path));
    }

    #[test]
    fn test_human_title_is_not_a_location() {
        let mut node = SchemaNode::typed("string");
        node.title = Some("Path to the file".into());
        assert_eq!(node.parameter_location(), None);

        node.title = Some("Query".into());
        assert_eq!(node.parameter_location(), None);
    }

    #[test]
    fn test_location_round_trips_through_serde() {
        let mut node = SchemaNode::typed("string");
        node.location = Some(ParamLocation::FormData);
        let raw = serde_json::to_value(&node).unwrap();
        assert_eq!(raw, json!({"type": "string", "x-parameter-location": "formData"}));
    }

    #[test]
    fn test_multi_has_no_delimiter() {
        let mut node = SchemaNode::typed("array");
        node.collection_format = Some("multi".into());
        assert_eq!(node.collection_delimiter(), None);
    }
}
