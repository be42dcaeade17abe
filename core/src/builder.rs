#![deny(missing_docs)]

//! # Resolver Builder
//!
//! Turns one schema definition into a [`Resolver`].
//!
//! Per property, in declaration order:
//! 1. define it,
//! 2. infer its admissible types (failure aborts the whole build),
//! 3. add `null` unless it is required,
//! 4. attach a normalizer when its parameter location is eligible (adds `string`),
//! 5. install the default and the enum.
//!
//! Finally every configured validator is attached.

use crate::config::ResolverConfig;
use crate::error::{AppError, AppResult};
use crate::normalizer::{default_normalizers, SchemaNormalizer};
use crate::oas::schema::{ParamLocation, SchemaNode};
use crate::oas::types::{infer_allowed_types, TypeTag};
use crate::resolver::{DeclarationBuilder, Resolver};
use crate::validator::{default_validators, SchemaValidator};
use std::sync::Arc;
use tracing::{debug, trace};

/// Builds resolvers from schema definitions.
///
/// The output depends only on the schema and on the configured validators,
/// normalizers and normalization locations.
#[derive(Clone, Default)]
pub struct SchemaResolverBuilder {
    validators: Vec<Arc<dyn SchemaValidator>>,
    normalizers: Vec<Arc<dyn SchemaNormalizer>>,
    normalization_locations: Vec<ParamLocation>,
}

impl SchemaResolverBuilder {
    /// Creates a builder from explicit collaborator lists.
    ///
    /// `normalizers` are consulted in order; `validators` are attached in order.
    pub fn new(
        validators: Vec<Arc<dyn SchemaValidator>>,
        normalizers: Vec<Arc<dyn SchemaNormalizer>>,
        normalization_locations: Vec<ParamLocation>,
    ) -> Self {
        SchemaResolverBuilder {
            validators,
            normalizers,
            normalization_locations,
        }
    }

    /// Creates a builder wired with the stock normalizers and validators
    /// enabled by `config`.
    pub fn from_config(config: &ResolverConfig) -> Self {
        let normalizers = if config.enable_normalization {
            default_normalizers()
        } else {
            Vec::new()
        };
        let validators = if config.enable_validators {
            default_validators()
        } else {
            Vec::new()
        };
        Self::new(
            validators,
            normalizers,
            config.normalization_locations.clone(),
        )
    }

    /// Builds a resolver for `definition`. `definition_name` is only used in
    /// error reports.
    pub fn build(&self, definition: &SchemaNode, definition_name: &str) -> AppResult<Resolver> {
        let mut declarations = DeclarationBuilder::new(definition.clone());
        self.populate(&mut declarations, definition, definition_name)?;
        Ok(declarations.finish())
    }

    /// Rebuilds `resolver` for another definition, reusing its allocations.
    pub fn rebuild(
        &self,
        resolver: Resolver,
        definition: &SchemaNode,
        definition_name: &str,
    ) -> AppResult<Resolver> {
        let mut declarations = resolver.into_declarations();
        declarations.clear().set_schema(definition.clone());
        self.populate(&mut declarations, definition, definition_name)?;
        Ok(declarations.finish())
    }

    fn populate(
        &self,
        declarations: &mut DeclarationBuilder,
        definition: &SchemaNode,
        definition_name: &str,
    ) -> AppResult<()> {
        if !definition.required.is_empty() {
            declarations.set_required(&definition.required);
        }

        if definition.properties.is_empty() {
            debug!(definition = definition_name, "definition declares no properties");
            return Ok(());
        }

        for (name, property) in &definition.properties {
            declarations.set_defined(name);

            let mut allowed_types =
                infer_allowed_types(property).ok_or_else(|| AppError::UndefinedPropertyType {
                    definition: definition_name.to_string(),
                    property: name.clone(),
                    ty: property.schema_type.clone().unwrap_or_default(),
                })?;

            if !declarations.is_required(name) {
                allowed_types.insert(TypeTag::Null);
            }

            declarations.set_allowed_types(name, allowed_types)?;
            self.attach_normalizer(declarations, name, property)?;

            if let Some(default) = property.default.as_ref().filter(|d| !d.is_null()) {
                declarations.set_default(name, default.clone())?;
            }

            if let Some(values) = property.enum_values.as_ref().filter(|v| !v.is_empty()) {
                declarations.set_allowed_values(name, values.clone())?;
            }
        }

        for validator in &self.validators {
            declarations.add_validator(Arc::clone(validator));
        }

        debug!(
            definition = definition_name,
            properties = definition.properties.len(),
            required = definition.required.len(),
            validators = self.validators.len(),
            "built resolver"
        );

        Ok(())
    }

    /// Binds the first supporting normalizer when the property's location is
    /// eligible, and widens its types with `string`.
    fn attach_normalizer(
        &self,
        declarations: &mut DeclarationBuilder,
        name: &str,
        property: &SchemaNode,
    ) -> AppResult<()> {
        let Some(location) = property.parameter_location() else {
            return Ok(());
        };
        if !self.normalization_locations.contains(&location) {
            return Ok(());
        }

        let is_required = declarations.is_required(name);
        let Some(provider) = self
            .normalizers
            .iter()
            .find(|n| n.supports(property, name, is_required))
        else {
            return Ok(());
        };

        trace!(property = name, %location, "attaching normalizer");
        let normalizer = provider.normalizer(property, name, is_required);
        declarations
            .set_normalizer(name, normalizer)?
            .add_allowed_types(name, [TypeTag::String])?;

        Ok(())
    }
}
