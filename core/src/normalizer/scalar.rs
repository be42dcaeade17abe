//! Normalizers for the scalar Swagger types.
//!
//! Each one only rewrites string input; values that already carry a JSON
//! type pass through untouched so the type check can judge them.

use super::{NormalizeFn, SchemaNormalizer};
use crate::oas::schema::SchemaNode;
use serde_json::{Number, Value};
use std::sync::Arc;

/// `"true"`/`"1"` and `"false"`/`"0"` to booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanNormalizer;

impl SchemaNormalizer for BooleanNormalizer {
    fn supports(&self, schema: &SchemaNode, _name: &str, _is_required: bool) -> bool {
        schema.schema_type.as_deref() == Some("boolean")
    }

    fn normalizer(&self, _schema: &SchemaNode, _name: &str, _is_required: bool) -> NormalizeFn {
        Arc::new(|value: &Value| match value {
            Value::String(raw) => match raw.as_str() {
                "true" | "1" => Ok(Value::Bool(true)),
                "false" | "0" => Ok(Value::Bool(false)),
                _ => Err("expected one of \"true\", \"false\", \"1\", \"0\"".to_string()),
            },
            other => Ok(other.clone()),
        })
    }
}

/// Decimal integer strings to JSON integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerNormalizer;

impl SchemaNormalizer for IntegerNormalizer {
    fn supports(&self, schema: &SchemaNode, _name: &str, _is_required: bool) -> bool {
        schema.schema_type.as_deref() == Some("integer")
    }

    fn normalizer(&self, _schema: &SchemaNode, _name: &str, _is_required: bool) -> NormalizeFn {
        Arc::new(|value: &Value| match value {
            Value::String(raw) => raw
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| format!("not an integer ({})", e)),
            other => Ok(other.clone()),
        })
    }
}

/// Decimal strings to JSON numbers. Integer strings stay integers so they
/// compare equal to integer enum literals. Non-finite results are refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberNormalizer;

impl SchemaNormalizer for NumberNormalizer {
    fn supports(&self, schema: &SchemaNode, _name: &str, _is_required: bool) -> bool {
        schema.schema_type.as_deref() == Some("number")
    }

    fn normalizer(&self, _schema: &SchemaNode, _name: &str, _is_required: bool) -> NormalizeFn {
        Arc::new(|value: &Value| -> Result<Value, String> {
            let Value::String(raw) = value else {
                return Ok(value.clone());
            };
            if let Ok(integer) = raw.parse::<i64>() {
                return Ok(Value::from(integer));
            }
            let parsed = raw
                .parse::<f64>()
                .map_err(|e| format!("not a number ({})", e))?;
            Number::from_f64(parsed)
                .map(Value::Number)
                .ok_or_else(|| "not a finite number".to_string())
        })
    }
}
