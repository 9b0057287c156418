//! # JSON Schema Validation
//!
//! Declarative structural validation of candidate records against a JSON
//! schema document. The walker supports the standard structural keywords
//! (`type`, `properties`, `required`, `items`, `enum`, `oneOf`) plus the
//! constraint keywords the ingredient schema relies on: `minimum`,
//! `maximum`, `minLength`, and `pattern`.
//!
//! Validation is all-or-nothing: no partial acceptance and no correction.
//! Errors carry enough context to tell the user which constraint was
//! violated and where.
//!
//! ```rust
//! use larder::validate_value;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {
//!         "name": {"type": "string", "minLength": 1},
//!         "shelf": {"type": "integer", "minimum": 0}
//!     },
//!     "required": ["name", "shelf"]
//! });
//!
//! assert!(validate_value(&json!({"name": "Rice", "shelf": 2}), &schema).is_ok());
//! assert!(validate_value(&json!({"name": "", "shelf": 2}), &schema).is_err());
//! assert!(validate_value(&json!({"name": "Rice"}), &schema).is_err());
//! ```

use regex::Regex;
use serde_json::{Map, Value};

const TYPE_KEY: &str = "type";
const PROPERTIES_KEY: &str = "properties";
const REQUIRED_KEY: &str = "required";
const ITEMS_KEY: &str = "items";
const ENUM_KEY: &str = "enum";
const ONE_OF_KEY: &str = "oneOf";
const MINIMUM_KEY: &str = "minimum";
const MAXIMUM_KEY: &str = "maximum";
const MIN_LENGTH_KEY: &str = "minLength";
const PATTERN_KEY: &str = "pattern";

const TYPE_NULL: &str = "null";
const TYPE_BOOLEAN: &str = "boolean";
const TYPE_INTEGER: &str = "integer";
const TYPE_NUMBER: &str = "number";
const TYPE_STRING: &str = "string";
const TYPE_ARRAY: &str = "array";
const TYPE_OBJECT: &str = "object";

/// Errors that can occur during schema validation.
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// The schema document itself is invalid or malformed.
    InvalidSchema(String),
    /// The value type doesn't match what the schema expects.
    TypeMismatch {
        /// The type the schema expects.
        expected: String,
        /// The actual type of the value.
        actual: String,
    },
    /// A required object property is missing.
    MissingRequiredProperty {
        /// Name of the missing property.
        property: String,
    },
    /// The value doesn't match any of the allowed enum values.
    EnumMismatch {
        /// The value that was provided.
        value: String,
        /// The values that would have been accepted.
        allowed_values: Vec<String>,
    },
    /// A numeric value is below the schema's `minimum`.
    BelowMinimum {
        /// The value that was provided.
        value: f64,
        /// The smallest accepted value.
        minimum: f64,
    },
    /// A numeric value is above the schema's `maximum`.
    AboveMaximum {
        /// The value that was provided.
        value: f64,
        /// The largest accepted value.
        maximum: f64,
    },
    /// A string is shorter than the schema's `minLength`.
    TooShort {
        /// Actual length in characters.
        length: usize,
        /// Minimum accepted length.
        min_length: usize,
    },
    /// A string does not match the schema's `pattern`.
    PatternMismatch {
        /// The value that was provided.
        value: String,
        /// The regular expression it must match.
        pattern: String,
    },
    /// An array item failed validation.
    ArrayItemError {
        /// Index of the failing item.
        index: usize,
        /// Underlying error.
        source: Box<ValidationError>,
    },
    /// An object property failed validation.
    ObjectPropertyError {
        /// Name of the failing property.
        property: String,
        /// Underlying error.
        source: Box<ValidationError>,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidSchema(msg) => write!(f, "Invalid schema: {}", msg),
            ValidationError::TypeMismatch { expected, actual } => {
                write!(f, "Type mismatch: expected {}, got {}", expected, actual)
            }
            ValidationError::MissingRequiredProperty { property } => {
                write!(f, "Missing required property: {}", property)
            }
            ValidationError::EnumMismatch {
                value,
                allowed_values,
            } => {
                write!(
                    f,
                    "Enum mismatch: '{}' is not one of {:?}",
                    value, allowed_values
                )
            }
            ValidationError::BelowMinimum { value, minimum } => {
                write!(f, "Value {} is below the minimum of {}", value, minimum)
            }
            ValidationError::AboveMaximum { value, maximum } => {
                write!(f, "Value {} is above the maximum of {}", value, maximum)
            }
            ValidationError::TooShort { length, min_length } => {
                write!(
                    f,
                    "String of length {} is shorter than the minimum length {}",
                    length, min_length
                )
            }
            ValidationError::PatternMismatch { value, pattern } => {
                write!(f, "'{}' does not match the pattern {}", value, pattern)
            }
            ValidationError::ArrayItemError { index, source } => {
                write!(f, "Array item error at index {}: {}", index, source)
            }
            ValidationError::ObjectPropertyError { property, source } => {
                write!(f, "Object property error at '{}': {}", property, source)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Returns a human-readable type name for a JSON value.
fn value_type(value: &Value) -> String {
    match value {
        Value::Null => TYPE_NULL.to_string(),
        Value::Bool(_) => TYPE_BOOLEAN.to_string(),
        Value::Number(n) if n.is_i64() || n.is_u64() => TYPE_INTEGER.to_string(),
        Value::Number(_) => TYPE_NUMBER.to_string(),
        Value::String(_) => TYPE_STRING.to_string(),
        Value::Array(_) => TYPE_ARRAY.to_string(),
        Value::Object(_) => TYPE_OBJECT.to_string(),
    }
}

/// Validates a JSON value against a JSON schema.
///
/// This is the only entry point collaborators use; everything else in the
/// module recurses from here.
pub fn validate_value(value: &Value, schema: &Value) -> Result<(), ValidationError> {
    let schema_obj = schema
        .as_object()
        .ok_or_else(|| ValidationError::InvalidSchema("Schema must be an object".to_string()))?;

    if let Some(one_of_schemas) = schema_obj.get(ONE_OF_KEY) {
        return validate_one_of(value, one_of_schemas);
    }

    let schema_type = schema_obj
        .get(TYPE_KEY)
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            ValidationError::InvalidSchema("Schema must have a type field".to_string())
        })?;

    match schema_type {
        TYPE_NULL => validate_null(value),
        TYPE_BOOLEAN => validate_boolean(value),
        TYPE_INTEGER => validate_integer(value, schema_obj),
        TYPE_NUMBER => validate_number(value, schema_obj),
        TYPE_STRING => validate_string(value, schema_obj),
        TYPE_ARRAY => validate_array(value, schema_obj),
        TYPE_OBJECT => validate_object(value, schema_obj),
        _ => Err(ValidationError::InvalidSchema(format!(
            "Unknown schema type: {}",
            schema_type
        ))),
    }
}

fn validate_one_of(value: &Value, one_of_schemas: &Value) -> Result<(), ValidationError> {
    let schemas_array = one_of_schemas
        .as_array()
        .ok_or_else(|| ValidationError::InvalidSchema("oneOf must be an array".to_string()))?;

    let mut failures = Vec::new();
    for schema in schemas_array {
        match validate_value(value, schema) {
            Ok(()) => return Ok(()),
            Err(e) => failures.push(e),
        }
    }

    Err(ValidationError::InvalidSchema(format!(
        "Value doesn't match any oneOf schemas. Errors: {:?}",
        failures
    )))
}

fn validate_null(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::Null => Ok(()),
        _ => Err(ValidationError::TypeMismatch {
            expected: TYPE_NULL.to_string(),
            actual: value_type(value),
        }),
    }
}

fn validate_boolean(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::Bool(_) => Ok(()),
        _ => Err(ValidationError::TypeMismatch {
            expected: TYPE_BOOLEAN.to_string(),
            actual: value_type(value),
        }),
    }
}

fn validate_integer(value: &Value, schema: &Map<String, Value>) -> Result<(), ValidationError> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => {
            validate_bounds(n.as_f64().unwrap_or(0.0), schema)
        }
        _ => Err(ValidationError::TypeMismatch {
            expected: TYPE_INTEGER.to_string(),
            actual: value_type(value),
        }),
    }
}

fn validate_number(value: &Value, schema: &Map<String, Value>) -> Result<(), ValidationError> {
    match value {
        Value::Number(n) => validate_bounds(n.as_f64().unwrap_or(0.0), schema),
        _ => Err(ValidationError::TypeMismatch {
            expected: TYPE_NUMBER.to_string(),
            actual: value_type(value),
        }),
    }
}

fn validate_bounds(value: f64, schema: &Map<String, Value>) -> Result<(), ValidationError> {
    if let Some(minimum) = schema.get(MINIMUM_KEY).and_then(Value::as_f64)
        && value < minimum
    {
        return Err(ValidationError::BelowMinimum { value, minimum });
    }
    if let Some(maximum) = schema.get(MAXIMUM_KEY).and_then(Value::as_f64)
        && value > maximum
    {
        return Err(ValidationError::AboveMaximum { value, maximum });
    }
    Ok(())
}

fn validate_string(value: &Value, schema: &Map<String, Value>) -> Result<(), ValidationError> {
    let string_value = match value {
        Value::String(s) => s,
        _ => {
            return Err(ValidationError::TypeMismatch {
                expected: TYPE_STRING.to_string(),
                actual: value_type(value),
            });
        }
    };

    if let Some(min_length) = schema.get(MIN_LENGTH_KEY).and_then(Value::as_u64) {
        let length = string_value.chars().count();
        if length < min_length as usize {
            return Err(ValidationError::TooShort {
                length,
                min_length: min_length as usize,
            });
        }
    }

    if let Some(pattern) = schema.get(PATTERN_KEY).and_then(Value::as_str) {
        let regex = Regex::new(pattern).map_err(|e| {
            ValidationError::InvalidSchema(format!("Invalid pattern '{}': {}", pattern, e))
        })?;
        if !regex.is_match(string_value) {
            return Err(ValidationError::PatternMismatch {
                value: string_value.clone(),
                pattern: pattern.to_string(),
            });
        }
    }

    if let Some(enum_values) = schema.get(ENUM_KEY) {
        validate_enum(string_value, enum_values)?;
    }

    Ok(())
}

fn validate_enum(value: &str, enum_values: &Value) -> Result<(), ValidationError> {
    let enum_array = enum_values
        .as_array()
        .ok_or_else(|| ValidationError::InvalidSchema("Enum must be an array".to_string()))?;

    let found = enum_array
        .iter()
        .any(|v| v.as_str().is_some_and(|s| s == value));

    if found {
        Ok(())
    } else {
        Err(ValidationError::EnumMismatch {
            value: value.to_string(),
            allowed_values: enum_array
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect(),
        })
    }
}

fn validate_array(value: &Value, schema: &Map<String, Value>) -> Result<(), ValidationError> {
    let array = match value {
        Value::Array(arr) => arr,
        _ => {
            return Err(ValidationError::TypeMismatch {
                expected: TYPE_ARRAY.to_string(),
                actual: value_type(value),
            });
        }
    };

    if let Some(items_schema) = schema.get(ITEMS_KEY) {
        match items_schema {
            Value::Array(item_schemas) => {
                for (index, item) in array.iter().enumerate() {
                    if let Some(item_schema) = item_schemas.get(index) {
                        validate_value(item, item_schema).map_err(|e| {
                            ValidationError::ArrayItemError {
                                index,
                                source: Box::new(e),
                            }
                        })?;
                    }
                }
            }
            schema => {
                for (index, item) in array.iter().enumerate() {
                    validate_value(item, schema).map_err(|e| ValidationError::ArrayItemError {
                        index,
                        source: Box::new(e),
                    })?;
                }
            }
        }
    }

    Ok(())
}

fn validate_object(value: &Value, schema: &Map<String, Value>) -> Result<(), ValidationError> {
    let object = match value {
        Value::Object(obj) => obj,
        _ => {
            return Err(ValidationError::TypeMismatch {
                expected: TYPE_OBJECT.to_string(),
                actual: value_type(value),
            });
        }
    };

    if let Some(properties) = schema.get(PROPERTIES_KEY) {
        let properties_obj = properties.as_object().ok_or_else(|| {
            ValidationError::InvalidSchema("Properties must be an object".to_string())
        })?;

        for (prop_name, prop_schema) in properties_obj {
            if let Some(prop_value) = object.get(prop_name) {
                validate_value(prop_value, prop_schema).map_err(|e| {
                    ValidationError::ObjectPropertyError {
                        property: prop_name.clone(),
                        source: Box::new(e),
                    }
                })?;
            }
        }
    }

    if let Some(required) = schema.get(REQUIRED_KEY) {
        let required_array = required.as_array().ok_or_else(|| {
            ValidationError::InvalidSchema("Required must be an array".to_string())
        })?;

        for required_prop in required_array {
            let prop_name = required_prop.as_str().ok_or_else(|| {
                ValidationError::InvalidSchema(
                    "Required property names must be strings".to_string(),
                )
            })?;

            if !object.contains_key(prop_name) {
                return Err(ValidationError::MissingRequiredProperty {
                    property: prop_name.to_string(),
                });
            }
        }
    }

    Ok(())
}
