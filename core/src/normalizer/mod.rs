#![deny(missing_docs)]

//! # Normalizers
//!
//! Values taken from a URL path, query string or header always arrive as
//! strings. A normalizer turns such a raw value into the value the type and
//! enum checks expect (e.g. `"42"` into `42`).
//!
//! Providers are consulted in priority order and the first one whose
//! [`SchemaNormalizer::supports`] accepts the property wins.

mod scalar;

pub use scalar::{BooleanNormalizer, IntegerNormalizer, NumberNormalizer};

use crate::oas::schema::SchemaNode;
use serde_json::Value;
use std::sync::Arc;

/// A bound normalization function. `Err` carries the reason for refusal.
pub type NormalizeFn = Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;

/// Provider of normalization functions.
pub trait SchemaNormalizer: Send + Sync {
    /// Whether this provider handles the property.
    fn supports(&self, schema: &SchemaNode, name: &str, is_required: bool) -> bool;

    /// Returns the function bound to the property.
    fn normalizer(&self, schema: &SchemaNode, name: &str, is_required: bool) -> NormalizeFn;
}

/// The providers shipped with the crate, in priority order.
pub fn default_normalizers() -> Vec<Arc<dyn SchemaNormalizer>> {
    vec![
        Arc::new(BooleanNormalizer),
        Arc::new(IntegerNormalizer),
        Arc::new(NumberNormalizer),
    ]
}
