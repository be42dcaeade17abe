//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace, and the
//! `ValidationError` reported when a resolver rejects caller input.

use derive_more::{Display, From};
use serde_json::Value;

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// Wrapper for YAML (de)serialization errors.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// A property schema matches none of the recognized type shapes.
    ///
    /// `ty` holds the raw declared type, empty when the schema declared none.
    #[from(ignore)]
    #[display("Property '{property}' of definition '{definition}' has undefined type '{ty}'")]
    UndefinedPropertyType {
        /// Definition (or `METHOD /route`) owning the property.
        definition: String,
        /// Offending property name.
        property: String,
        /// Raw declared type.
        ty: String,
    },

    /// A declaration was attached to a property that was never defined.
    #[from(ignore)]
    #[display("Property '{_0}' is not defined on this resolver")]
    UndeclaredProperty(String),

    /// The named definition does not exist in the loaded document.
    #[from(ignore)]
    #[display("Definition '{_0}' not found")]
    DefinitionNotFound(String),

    /// The route does not exist in the loaded document.
    #[from(ignore)]
    #[display("Path '{_0}' not found")]
    PathNotFound(String),

    /// The route exists but does not declare the requested method.
    #[from(ignore)]
    #[display("Operation '{method}' not found for path '{path}'")]
    OperationNotFound {
        /// Route path.
        path: String,
        /// Requested HTTP method.
        method: String,
    },

    /// Two parameters of one operation resolve to the same property name.
    #[from(ignore)]
    #[display("Parameter '{name}' is declared more than once")]
    ParameterCollision {
        /// Colliding property name.
        name: String,
    },

    /// Caller input was rejected by a resolver.
    #[display("Validation Error: {_0}")]
    Validation(ValidationError),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

/// Resolve-time failures. Each names the property it concerns.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum ValidationError {
    /// A required property is absent and has no default.
    #[display("The required property '{property}' is missing")]
    MissingRequired {
        /// Property name.
        property: String,
    },
    /// A present value matches none of the admissible types.
    #[display(
        "The property '{property}' with value {value} is expected to be of type \"{}\"",
        allowed.join("\" or \"")
    )]
    TypeMismatch {
        /// Property name.
        property: String,
        /// Value after normalization.
        value: Value,
        /// Admissible type tags, in declaration order.
        allowed: Vec<String>,
    },
    /// A present value is not one of the allowed literals.
    #[display(
        "The property '{property}' with value {value} is invalid. Accepted values are: {}",
        join_literals(allowed)
    )]
    EnumViolation {
        /// Property name.
        property: String,
        /// Value after normalization.
        value: Value,
        /// Allowed literals.
        allowed: Vec<Value>,
    },
    /// The input carries keys outside the declared contract.
    #[display(
        "The properties \"{}\" do not exist. Defined properties are: \"{}\"",
        keys.join("\", \""),
        defined.join("\", \"")
    )]
    UnknownKeys {
        /// Offending keys, in input order.
        keys: Vec<String>,
        /// Declared property names.
        defined: Vec<String>,
    },
    /// The bound normalizer refused the raw value.
    #[display("The property '{property}' with value {value} could not be normalized: {reason}")]
    NormalizationFailed {
        /// Property name.
        property: String,
        /// Raw input value.
        value: Value,
        /// Normalizer message.
        reason: String,
    },
    /// A cross-cutting validator rejected the resolved mapping.
    #[display("Property '{property}': {message}")]
    Constraint {
        /// Property the validator complained about.
        property: String,
        /// Validator message.
        message: String,
    },
}

impl ValidationError {
    /// The property the failure concerns, or the first unknown key.
    pub fn property(&self) -> &str {
        match self {
            ValidationError::MissingRequired { property }
            | ValidationError::TypeMismatch { property, .. }
            | ValidationError::EnumViolation { property, .. }
            | ValidationError::NormalizationFailed { property, .. }
            | ValidationError::Constraint { property, .. } => property,
            ValidationError::UnknownKeys { keys, .. } => {
                keys.first().map(String::as_str).unwrap_or_default()
            }
        }
    }
}

/// Renders enum literals as a comma-separated list of JSON values.
fn join_literals(allowed: &[Value]) -> String {
    allowed
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_undefined_property_type_display() {
        let err = AppError::UndefinedPropertyType {
            definition: "Pet".into(),
            property: "tags".into(),
            ty: "".into(),
        };
        assert_eq!(
            err.to_string(),
            "Property 'tags' of definition 'Pet' has undefined type ''"
        );
    }

    #[test]
    fn test_validation_conversion_keeps_payload() {
        let inner = ValidationError::MissingRequired {
            property: "id".into(),
        };
        let app_err: AppError = inner.clone().into();
        match app_err {
            AppError::Validation(v) => assert_eq!(v, inner),
            _ => panic!("ValidationError should convert to AppError::Validation"),
        }
    }

    #[test]
    fn test_type_mismatch_message_lists_allowed_types() {
        let err = ValidationError::TypeMismatch {
            property: "count".into(),
            value: json!("x"),
            allowed: vec!["integer".into(), "int".into()],
        };
        assert_eq!(
            err.to_string(),
            "The property 'count' with value \"x\" is expected to be of type \"integer\" or \"int\""
        );
        assert_eq!(err.property(), "count");
    }

    #[test]
    fn test_unknown_keys_property_is_first_key() {
        let err = ValidationError::UnknownKeys {
            keys: vec!["extra".into(), "other".into()],
            defined: vec!["name".into()],
        };
        assert_eq!(err.property(), "extra");
        assert_eq!(
            err.to_string(),
            "The properties \"extra\", \"other\" do not exist. Defined properties are: \"name\""
        );
    }

    #[test]
    fn test_enum_and_constraint_messages() {
        let err = ValidationError::EnumViolation {
            property: "status".into(),
            value: json!("pending"),
            allowed: vec![json!("open"), json!(2)],
        };
        assert_eq!(
            err.to_string(),
            "The property 'status' with value \"pending\" is invalid. Accepted values are: \"open\", 2"
        );

        let err = ValidationError::Constraint {
            property: "limit".into(),
            message: "must be at most 100".into(),
        };
        assert_eq!(err.to_string(), "Property 'limit': must be at most 100");
        assert_eq!(
            AppError::from(err).to_string(),
            "Validation Error: Property 'limit': must be at most 100"
        );
    }

    #[test]
    fn test_missing_and_normalization_messages() {
        let missing = ValidationError::MissingRequired {
            property: "id".into(),
        };
        assert_eq!(missing.to_string(), "The required property 'id' is missing");

        let failed = ValidationError::NormalizationFailed {
            property: "limit".into(),
            value: json!("ten"),
            reason: "not a number".into(),
        };
        assert_eq!(
            failed.to_string(),
            "The property 'limit' with value \"ten\" could not be normalized: not a number"
        );
    }
}
