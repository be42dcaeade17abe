#![deny(missing_docs)]

//! # Resolver
//!
//! The immutable, shareable half of a resolver. Once built it only serves
//! [`Resolver::resolve`] calls, each of which reads the declarations and
//! returns a fresh mapping, so one instance can be used from many threads.
//!
//! Resolution of one input runs in this order:
//! 1. Reject keys that are not declared.
//! 2. Per declared property: substitute the default or `null` when absent
//!    (required properties without default fail), otherwise normalize, then
//!    check type, then check allowed values.
//! 3. Run the validators, stopping at the first failure.

mod declarations;

pub use declarations::{DeclarationBuilder, PropertyDeclaration};

use crate::error::{AppResult, ValidationError};
use crate::oas::schema::SchemaNode;
use serde_json::{Map, Value};
use tracing::trace;

/// A frozen set of property declarations.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    declarations: DeclarationBuilder,
}

impl Resolver {
    pub(crate) fn from_declarations(declarations: DeclarationBuilder) -> Self {
        Resolver { declarations }
    }

    /// Returns to the mutable phase, keeping every declaration.
    pub fn into_declarations(self) -> DeclarationBuilder {
        self.declarations
    }

    /// Schema the resolver was built from.
    pub fn schema(&self) -> &SchemaNode {
        &self.declarations.schema
    }

    /// Whether `name` is required.
    pub fn is_required(&self, name: &str) -> bool {
        self.declarations.is_required(name)
    }

    /// Whether `name` is declared.
    pub fn is_defined(&self, name: &str) -> bool {
        self.declarations.is_defined(name)
    }

    /// Declared property names, in declaration order.
    pub fn defined_names(&self) -> impl Iterator<Item = &str> {
        self.declarations.properties.keys().map(String::as_str)
    }

    /// Required property names.
    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.declarations.required.iter().map(String::as_str)
    }

    /// Declaration of `name`.
    pub fn declaration(&self, name: &str) -> Option<&PropertyDeclaration> {
        self.declarations.properties.get(name)
    }

    /// All declarations, in declaration order.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &PropertyDeclaration)> {
        self.declarations
            .properties
            .iter()
            .map(|(name, declaration)| (name.as_str(), declaration))
    }

    /// Number of attached validators.
    pub fn validator_count(&self) -> usize {
        self.declarations.validators.len()
    }

    /// Validates and normalizes `input` against the declarations.
    ///
    /// The output holds every declared property, in declaration order.
    pub fn resolve(&self, input: &Map<String, Value>) -> AppResult<Map<String, Value>> {
        let unknown: Vec<String> = input
            .keys()
            .filter(|key| !self.is_defined(key))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(ValidationError::UnknownKeys {
                keys: unknown,
                defined: self.defined_names().map(String::from).collect(),
            }
            .into());
        }

        let mut resolved = Map::new();
        for (name, declaration) in &self.declarations.properties {
            let value = match input.get(name) {
                Some(raw) => resolve_present(name, declaration, raw)?,
                None => match &declaration.default {
                    Some(default) => default.clone(),
                    None if self.is_required(name) => {
                        return Err(ValidationError::MissingRequired {
                            property: name.clone(),
                        }
                        .into());
                    }
                    None => Value::Null,
                },
            };
            trace!(property = %name, %value, "resolved property");
            resolved.insert(name.clone(), value);
        }

        let schema = &self.declarations.schema;
        for validator in &self.declarations.validators {
            if validator.supports(schema) {
                validator.validate(schema, &resolved)?;
            }
        }

        Ok(resolved)
    }
}

fn resolve_present(
    name: &str,
    declaration: &PropertyDeclaration,
    raw: &Value,
) -> Result<Value, ValidationError> {
    let value = match &declaration.normalizer {
        Some(normalize) => {
            normalize(raw).map_err(|reason| ValidationError::NormalizationFailed {
                property: name.to_string(),
                value: raw.clone(),
                reason,
            })?
        }
        None => raw.clone(),
    };

    if !declaration.accepts_type(&value) {
        return Err(ValidationError::TypeMismatch {
            property: name.to_string(),
            value,
            allowed: declaration
                .allowed_types
                .iter()
                .map(ToString::to_string)
                .collect(),
        });
    }

    if let Some(allowed) = &declaration.allowed_values {
        let nullable_null = value.is_null() && declaration.is_nullable();
        if !nullable_null && !allowed.iter().any(|literal| same_literal(literal, &value)) {
            return Err(ValidationError::EnumViolation {
                property: name.to_string(),
                value,
                allowed: allowed.clone(),
            });
        }
    }

    Ok(value)
}

/// Enum membership. Numbers compare by value, so `2` and `2.0` are the same literal.
fn same_literal(literal: &Value, value: &Value) -> bool {
    match (literal, value) {
        (Value::Number(a), Value::Number(b)) => a == b || a.as_f64() == b.as_f64(),
        _ => literal == value,
    }
}
