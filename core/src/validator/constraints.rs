//! Validators for the Swagger 2.0 constraint keywords.

use super::{constrained_values, SchemaValidator};
use crate::error::ValidationError;
use crate::oas::schema::SchemaNode;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::RwLock;

fn breach(property: &str, message: String) -> Result<(), ValidationError> {
    Err(ValidationError::Constraint {
        property: property.to_string(),
        message,
    })
}

/// `minLength` / `maxLength`, counted in characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringLengthValidator;

fn declares_length(property: &SchemaNode) -> bool {
    property.min_length.is_some() || property.max_length.is_some()
}

impl SchemaValidator for StringLengthValidator {
    fn supports(&self, schema: &SchemaNode) -> bool {
        schema.properties.values().any(declares_length)
    }

    fn validate(
        &self,
        schema: &SchemaNode,
        resolved: &Map<String, Value>,
    ) -> Result<(), ValidationError> {
        for (name, property, value) in constrained_values(schema, resolved, declares_length) {
            let Some(text) = value.as_str() else {
                continue;
            };
            let length = text.chars().count() as u64;

            if let Some(min) = property.min_length {
                if length < min {
                    return breach(
                        name,
                        format!("length {} is less than the minimum of {}", length, min),
                    );
                }
            }
            if let Some(max) = property.max_length {
                if length > max {
                    return breach(
                        name,
                        format!("length {} is greater than the maximum of {}", length, max),
                    );
                }
            }
        }
        Ok(())
    }
}

/// `pattern`, matched unanchored like ECMA regular expressions.
///
/// Each distinct pattern is compiled once and kept for later calls, so a
/// validator shared by many resolvers stays cheap per request.
#[derive(Debug, Default)]
pub struct PatternValidator {
    compiled: RwLock<HashMap<String, Regex>>,
}

impl PatternValidator {
    /// Creates a validator with an empty pattern cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of patterns compiled so far.
    pub fn cached_patterns(&self) -> usize {
        self.compiled.read().map(|cache| cache.len()).unwrap_or(0)
    }

    fn regex(&self, pattern: &str) -> Result<Regex, regex::Error> {
        if let Some(re) = self
            .compiled
            .read()
            .ok()
            .and_then(|cache| cache.get(pattern).cloned())
        {
            return Ok(re);
        }

        let re = Regex::new(pattern)?;
        if let Ok(mut cache) = self.compiled.write() {
            cache.insert(pattern.to_string(), re.clone());
        }
        Ok(re)
    }
}

fn declares_pattern(property: &SchemaNode) -> bool {
    property.pattern.is_some()
}

impl SchemaValidator for PatternValidator {
    fn supports(&self, schema: &SchemaNode) -> bool {
        schema.properties.values().any(declares_pattern)
    }

    fn validate(
        &self,
        schema: &SchemaNode,
        resolved: &Map<String, Value>,
    ) -> Result<(), ValidationError> {
        for (name, property, value) in constrained_values(schema, resolved, declares_pattern) {
            let (Some(pattern), Some(text)) = (property.pattern.as_deref(), value.as_str()) else {
                continue;
            };
            let re = match self.regex(pattern) {
                Ok(re) => re,
                Err(e) => return breach(name, format!("invalid pattern '{}': {}", pattern, e)),
            };
            if !re.is_match(text) {
                return breach(
                    name,
                    format!("value \"{}\" does not match pattern '{}'", text, pattern),
                );
            }
        }
        Ok(())
    }
}

/// `minimum` / `maximum` (with the boolean exclusive flags) and `multipleOf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberRangeValidator;

fn declares_range(property: &SchemaNode) -> bool {
    property.minimum.is_some() || property.maximum.is_some() || property.multiple_of.is_some()
}

impl SchemaValidator for NumberRangeValidator {
    fn supports(&self, schema: &SchemaNode) -> bool {
        schema.properties.values().any(declares_range)
    }

    fn validate(
        &self,
        schema: &SchemaNode,
        resolved: &Map<String, Value>,
    ) -> Result<(), ValidationError> {
        for (name, property, value) in constrained_values(schema, resolved, declares_range) {
            let Some(number) = value.as_f64() else {
                continue;
            };

            if let Some(min) = property.minimum {
                let below = if property.exclusive_minimum {
                    number <= min
                } else {
                    number < min
                };
                if below {
                    let bound = if property.exclusive_minimum {
                        "exclusive"
                    } else {
                        "inclusive"
                    };
                    return breach(
                        name,
                        format!("value {} is below the {} minimum of {}", number, bound, min),
                    );
                }
            }

            if let Some(max) = property.maximum {
                let above = if property.exclusive_maximum {
                    number >= max
                } else {
                    number > max
                };
                if above {
                    let bound = if property.exclusive_maximum {
                        "exclusive"
                    } else {
                        "inclusive"
                    };
                    return breach(
                        name,
                        format!("value {} is above the {} maximum of {}", number, bound, max),
                    );
                }
            }

            if let Some(divisor) = property.multiple_of {
                if divisor > 0.0 && !is_multiple_of(number, divisor) {
                    return breach(
                        name,
                        format!("value {} is not a multiple of {}", number, divisor),
                    );
                }
            }
        }
        Ok(())
    }
}

fn is_multiple_of(number: f64, divisor: f64) -> bool {
    let quotient = number / divisor;
    (quotient - quotient.round()).abs() <= f64::EPSILON * quotient.abs().max(1.0)
}

/// `minItems` / `maxItems` / `uniqueItems`.
///
/// Arrays declared with a delimited `collectionFormat` are still strings at
/// this point; they are split before counting.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayItemsValidator;

fn declares_items(property: &SchemaNode) -> bool {
    property.min_items.is_some() || property.max_items.is_some() || property.unique_items
}

fn array_items(property: &SchemaNode, value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items.clone()),
        Value::String(raw) => {
            let delimiter = property.collection_delimiter()?;
            if raw.is_empty() {
                return Some(Vec::new());
            }
            Some(
                raw.split(delimiter)
                    .map(|item| Value::String(item.to_string()))
                    .collect(),
            )
        }
        _ => None,
    }
}

impl SchemaValidator for ArrayItemsValidator {
    fn supports(&self, schema: &SchemaNode) -> bool {
        schema.properties.values().any(declares_items)
    }

    fn validate(
        &self,
        schema: &SchemaNode,
        resolved: &Map<String, Value>,
    ) -> Result<(), ValidationError> {
        for (name, property, value) in constrained_values(schema, resolved, declares_items) {
            let Some(items) = array_items(property, value) else {
                continue;
            };
            let count = items.len() as u64;

            if let Some(min) = property.min_items {
                if count < min {
                    return breach(
                        name,
                        format!("{} item(s) is less than the minimum of {}", count, min),
                    );
                }
            }
            if let Some(max) = property.max_items {
                if count > max {
                    return breach(
                        name,
                        format!("{} item(s) is greater than the maximum of {}", count, max),
                    );
                }
            }
            if property.unique_items {
                for (i, item) in items.iter().enumerate() {
                    if items[..i].contains(item) {
                        return breach(name, format!("item {} is not unique", item));
                    }
                }
            }
        }
        Ok(())
    }
}
