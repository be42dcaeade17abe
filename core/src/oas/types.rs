#![deny(missing_docs)]

//! # Type Inference
//!
//! Maps a property's schema shape onto the set of runtime type tags a
//! resolver will admit for it.
//!
//! | declared `type`                  | tags                          |
//! |----------------------------------|-------------------------------|
//! | `string`                         | string                        |
//! | `integer`                        | integer, int                  |
//! | `boolean`                        | boolean, bool                 |
//! | `number`                         | double, float                 |
//! | `array`                          | array                         |
//! | `array` + `collectionFormat`     | string                        |
//! | `object`                         | object, array                 |
//! | absent + `$ref`                  | object, array, *target name*  |

use crate::oas::ref_utils::ref_target_name;
use crate::oas::schema::SchemaNode;
use derive_more::Display;
use indexmap::IndexSet;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// One admissible runtime type label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum TypeTag {
    /// JSON string.
    #[display("string")]
    String,
    /// Integral number.
    #[display("integer")]
    Integer,
    /// Synonym of `Integer`.
    #[display("int")]
    Int,
    /// JSON boolean.
    #[display("boolean")]
    Boolean,
    /// Synonym of `Boolean`.
    #[display("bool")]
    Bool,
    /// Any JSON number.
    #[display("double")]
    Double,
    /// Synonym of `Double`.
    #[display("float")]
    Float,
    /// JSON array.
    #[display("array")]
    Array,
    /// JSON object.
    #[display("object")]
    Object,
    /// Absent / null value.
    #[display("null")]
    Null,
    /// Instance of a named definition.
    #[display("{_0}")]
    Ref(String),
}

impl TypeTag {
    /// Whether `value` has the shape this tag names.
    ///
    /// `Ref` tags never match on their own; they travel together with
    /// `object` and `array`, which do the structural check.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            TypeTag::String => value.is_string(),
            TypeTag::Integer | TypeTag::Int => value.is_i64() || value.is_u64(),
            TypeTag::Boolean | TypeTag::Bool => value.is_boolean(),
            TypeTag::Double | TypeTag::Float => value.is_number(),
            TypeTag::Array => value.is_array(),
            TypeTag::Object => value.is_object(),
            TypeTag::Null => value.is_null(),
            TypeTag::Ref(_) => false,
        }
    }
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered, deduplicated set of type tags.
pub type TypeSet = IndexSet<TypeTag>;

/// Infers the admissible tags for one property schema.
///
/// Returns `None` when the shape is not recognized: an unknown `type`, or
/// neither `type` nor `$ref`.
pub fn infer_allowed_types(schema: &SchemaNode) -> Option<TypeSet> {
    let tags: Vec<TypeTag> = match schema.schema_type.as_deref() {
        Some("string") => vec![TypeTag::String],
        Some("integer") => vec![TypeTag::Integer, TypeTag::Int],
        Some("boolean") => vec![TypeTag::Boolean, TypeTag::Bool],
        Some("number") => vec![TypeTag::Double, TypeTag::Float],
        Some("array") => {
            if schema.collection_format.is_none() {
                vec![TypeTag::Array]
            } else {
                // Delimited arrays arrive pre-serialized.
                vec![TypeTag::String]
            }
        }
        Some("object") => vec![TypeTag::Object, TypeTag::Array],
        Some(_) => return None,
        None => {
            let reference = schema.reference.as_deref().filter(|r| !r.is_empty())?;
            vec![
                TypeTag::Object,
                TypeTag::Array,
                TypeTag::Ref(ref_target_name(reference)),
            ]
        }
    };

    Some(tags.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tags(schema: &SchemaNode) -> Vec<String> {
        infer_allowed_types(schema)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_map_primitives() {
        assert_eq!(tags(&SchemaNode::typed("string")), vec!["string"]);
        assert_eq!(tags(&SchemaNode::typed("integer")), vec!["integer", "int"]);
        assert_eq!(tags(&SchemaNode::typed("boolean")), vec!["boolean", "bool"]);
        assert_eq!(tags(&SchemaNode::typed("number")), vec!["double", "float"]);
    }

    #[test]
    fn test_map_arrays() {
        assert_eq!(tags(&SchemaNode::typed("array")), vec!["array"]);

        let mut csv = SchemaNode::typed("array");
        csv.collection_format = Some("csv".into());
        assert_eq!(tags(&csv), vec!["string"]);
    }

    #[test]
    fn test_map_object() {
        assert_eq!(tags(&SchemaNode::typed("object")), vec!["object", "array"]);
    }

    #[test]
    fn test_ref_resolution() {
        let r = SchemaNode::reference("#/definitions/Widget");
        assert_eq!(tags(&r), vec!["object", "array", "Widget"]);
    }

    #[test]
    fn test_type_wins_over_ref() {
        let mut node = SchemaNode::typed("string");
        node.reference = Some("#/definitions/Widget".into());
        assert_eq!(tags(&node), vec!["string"]);
    }

    #[test]
    fn test_unrecognized_shapes_fail() {
        assert!(infer_allowed_types(&SchemaNode::default()).is_none());
        assert!(infer_allowed_types(&SchemaNode::typed("file")).is_none());
        assert!(infer_allowed_types(&SchemaNode::reference("")).is_none());
    }

    #[test]
    fn test_tag_matching() {
        assert!(TypeTag::Int.matches(&json!(5)));
        assert!(!TypeTag::Integer.matches(&json!(5.5)));
        assert!(TypeTag::Float.matches(&json!(5)));
        assert!(TypeTag::Double.matches(&json!(5.5)));
        assert!(TypeTag::Bool.matches(&json!(false)));
        assert!(TypeTag::Array.matches(&json!([1])));
        assert!(TypeTag::Object.matches(&json!({"a": 1})));
        assert!(TypeTag::Null.matches(&json!(null)));
        assert!(!TypeTag::Ref("Widget".into()).matches(&json!({})));
    }

    #[test]
    fn test_tag_serializes_as_label() {
        let set: TypeSet = [TypeTag::Integer, TypeTag::Ref("Pet".into())]
            .into_iter()
            .collect();
        assert_eq!(serde_json::to_value(&set).unwrap(), json!(["integer", "Pet"]));
    }
}
