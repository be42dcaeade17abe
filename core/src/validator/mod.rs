#![deny(missing_docs)]

//! # Cross-cutting Validators
//!
//! Validators run after every property of a resolver has been normalized and
//! type-checked. They see the whole resolved mapping together with the
//! schema the resolver was built from, so a single validator can enforce a
//! keyword (e.g. `maxLength`) across all properties.

mod constraints;

pub use constraints::{
    ArrayItemsValidator, NumberRangeValidator, PatternValidator, StringLengthValidator,
};

use crate::error::ValidationError;
use crate::oas::schema::SchemaNode;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A check over a fully resolved property mapping.
pub trait SchemaValidator: Send + Sync {
    /// Whether the schema declares anything this validator enforces.
    fn supports(&self, schema: &SchemaNode) -> bool;

    /// Checks the resolved mapping. The first breach is returned.
    fn validate(
        &self,
        schema: &SchemaNode,
        resolved: &Map<String, Value>,
    ) -> Result<(), ValidationError>;
}

/// The validators shipped with the crate, in registration order.
pub fn default_validators() -> Vec<Arc<dyn SchemaValidator>> {
    vec![
        Arc::new(StringLengthValidator),
        Arc::new(PatternValidator::new()),
        Arc::new(NumberRangeValidator),
        Arc::new(ArrayItemsValidator),
    ]
}

/// Properties of `schema` matching `declares`, paired with their non-null
/// resolved value.
pub(crate) fn constrained_values<'a>(
    schema: &'a SchemaNode,
    resolved: &'a Map<String, Value>,
    declares: impl Fn(&SchemaNode) -> bool + 'a,
) -> impl Iterator<Item = (&'a str, &'a SchemaNode, &'a Value)> + 'a {
    schema
        .properties
        .iter()
        .filter(move |(_, property)| declares(*property))
        .filter_map(move |(name, property)| match resolved.get(name) {
            Some(Value::Null) | None => None,
            Some(value) => Some((name.as_str(), property, value)),
        })
}
