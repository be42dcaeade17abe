#![deny(missing_docs)]

//! # Property Declarations
//!
//! The mutable half of a resolver. A [`DeclarationBuilder`] collects which
//! properties exist, which are required and what each one accepts; calling
//! [`DeclarationBuilder::finish`] freezes it into a [`Resolver`].
//!
//! Every `set_*` / `add_*` call addressing a property must be preceded by
//! [`DeclarationBuilder::set_defined`] (or `set_required`) for that name.

use crate::error::{AppError, AppResult};
use crate::normalizer::NormalizeFn;
use crate::oas::schema::SchemaNode;
use crate::oas::types::{TypeSet, TypeTag};
use crate::resolver::Resolver;
use crate::validator::SchemaValidator;
use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Everything a resolver knows about one property.
#[derive(Clone, Default)]
pub struct PropertyDeclaration {
    pub(crate) allowed_types: TypeSet,
    pub(crate) default: Option<Value>,
    pub(crate) allowed_values: Option<Vec<Value>>,
    pub(crate) normalizer: Option<NormalizeFn>,
}

impl PropertyDeclaration {
    /// Admissible type tags. Empty means any value is accepted.
    pub fn allowed_types(&self) -> &TypeSet {
        &self.allowed_types
    }

    /// Value substituted when the property is absent.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Allowed literals, if the property is an enum.
    pub fn allowed_values(&self) -> Option<&[Value]> {
        self.allowed_values.as_deref()
    }

    /// Whether a normalizer is bound.
    pub fn has_normalizer(&self) -> bool {
        self.normalizer.is_some()
    }

    /// Whether the property admits the `null` marker.
    pub fn is_nullable(&self) -> bool {
        self.allowed_types.contains(&TypeTag::Null)
    }

    pub(crate) fn accepts_type(&self, value: &Value) -> bool {
        self.allowed_types.is_empty() || self.allowed_types.iter().any(|tag| tag.matches(value))
    }
}

// Manual Debug implementation since normalizers are opaque closures.
impl fmt::Debug for PropertyDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDeclaration")
            .field("allowed_types", &self.allowed_types)
            .field("default", &self.default)
            .field("allowed_values", &self.allowed_values)
            .field("normalizer", &self.normalizer.as_ref().map(|_| "Some(Fn)"))
            .finish()
    }
}

/// Mutable declaration set, frozen into a [`Resolver`] by `finish`.
#[derive(Clone, Default)]
pub struct DeclarationBuilder {
    pub(crate) schema: SchemaNode,
    pub(crate) properties: IndexMap<String, PropertyDeclaration>,
    pub(crate) required: IndexSet<String>,
    pub(crate) validators: Vec<Arc<dyn SchemaValidator>>,
}

impl DeclarationBuilder {
    /// Creates an empty declaration set for `schema`.
    ///
    /// The schema is handed to validators at resolve time.
    pub fn new(schema: SchemaNode) -> Self {
        DeclarationBuilder {
            schema,
            ..Default::default()
        }
    }

    /// Replaces the schema handed to validators.
    pub fn set_schema(&mut self, schema: SchemaNode) -> &mut Self {
        self.schema = schema;
        self
    }

    /// Registers `name` as part of the contract. Idempotent.
    pub fn set_defined(&mut self, name: &str) -> &mut Self {
        if !self.properties.contains_key(name) {
            self.properties
                .insert(name.to_string(), PropertyDeclaration::default());
        }
        self
    }

    /// Marks every name as required, defining it if needed.
    pub fn set_required<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            self.set_defined(name);
            self.required.insert(name.to_string());
        }
        self
    }

    /// Whether `name` is required.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Whether `name` has been defined.
    pub fn is_defined(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Replaces the admissible types of `name`.
    pub fn set_allowed_types(
        &mut self,
        name: &str,
        types: impl IntoIterator<Item = TypeTag>,
    ) -> AppResult<&mut Self> {
        self.declaration_mut(name)?.allowed_types = types.into_iter().collect();
        Ok(self)
    }

    /// Adds to the admissible types of `name`. Tags already present keep
    /// their position.
    pub fn add_allowed_types(
        &mut self,
        name: &str,
        types: impl IntoIterator<Item = TypeTag>,
    ) -> AppResult<&mut Self> {
        self.declaration_mut(name)?.allowed_types.extend(types);
        Ok(self)
    }

    /// Sets the value substituted when `name` is absent.
    pub fn set_default(&mut self, name: &str, value: Value) -> AppResult<&mut Self> {
        self.declaration_mut(name)?.default = Some(value);
        Ok(self)
    }

    /// Restricts `name` to the given literals.
    pub fn set_allowed_values(&mut self, name: &str, values: Vec<Value>) -> AppResult<&mut Self> {
        self.declaration_mut(name)?.allowed_values = Some(values);
        Ok(self)
    }

    /// Binds a normalizer to `name`, replacing any previous one.
    pub fn set_normalizer(&mut self, name: &str, normalizer: NormalizeFn) -> AppResult<&mut Self> {
        self.declaration_mut(name)?.normalizer = Some(normalizer);
        Ok(self)
    }

    /// Appends a cross-cutting validator. Validators run in this order.
    pub fn add_validator(&mut self, validator: Arc<dyn SchemaValidator>) -> &mut Self {
        self.validators.push(validator);
        self
    }

    /// Drops every declaration, the required set, the validators and the
    /// schema. Allocated capacity is kept.
    pub fn clear(&mut self) -> &mut Self {
        self.schema = SchemaNode::default();
        self.properties.clear();
        self.required.clear();
        self.validators.clear();
        self
    }

    /// Freezes the declarations.
    pub fn finish(self) -> Resolver {
        Resolver::from_declarations(self)
    }

    fn declaration_mut(&mut self, name: &str) -> AppResult<&mut PropertyDeclaration> {
        self.properties
            .get_mut(name)
            .ok_or_else(|| AppError::UndeclaredProperty(name.to_string()))
    }
}

impl fmt::Debug for DeclarationBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclarationBuilder")
            .field("properties", &self.properties)
            .field("required", &self.required)
            .field("validators", &self.validators.len())
            .finish()
    }
}
