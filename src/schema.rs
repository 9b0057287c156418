//! Schema definition provider.
//!
//! The record schema is a plain JSON document, loaded once and treated as
//! static for the lifetime of the process. A canonical schema for the
//! ingredient record ships built in; deployments that want to tweak
//! constraints can point the daemon at an external schema file instead.

use std::path::Path;

use serde_json::{Value, json};

/// Errors that can occur while loading an external schema document.
#[derive(Debug, Clone)]
pub enum SchemaError {
    /// The schema file could not be read.
    Io(String),
    /// The schema file is not valid JSON.
    Parse(String),
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::Io(msg) => write!(f, "Failed to read schema: {}", msg),
            SchemaError::Parse(msg) => write!(f, "Failed to parse schema: {}", msg),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Holds the schema document all candidate records are validated against.
#[derive(Debug, Clone)]
pub struct SchemaProvider {
    schema: Value,
}

impl SchemaProvider {
    /// Creates a provider serving the built-in ingredient schema.
    pub fn builtin() -> Self {
        SchemaProvider {
            schema: builtin_schema(),
        }
    }

    /// Loads a schema document from an external file. Unlike the record
    /// store, a broken schema is fatal: validating against garbage would
    /// silently accept garbage.
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let contents = std::fs::read_to_string(path).map_err(|e| SchemaError::Io(e.to_string()))?;
        let schema = serde_json::from_str(&contents).map_err(|e| SchemaError::Parse(e.to_string()))?;
        Ok(SchemaProvider { schema })
    }

    /// Returns the schema document.
    pub fn get_schema(&self) -> &Value {
        &self.schema
    }
}

impl Default for SchemaProvider {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A list of trimmed, non-empty strings.
fn string_list() -> Value {
    json!({
        "type": "array",
        "items": {"type": "string", "minLength": 1}
    })
}

/// The canonical ingredient record schema.
///
/// Every field of the record is required; collaborators are expected to run
/// their raw input through [`crate::IngredientBuilder`], which fills in a
/// defined default for everything the user left blank.
pub fn builtin_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": {"type": "string", "minLength": 1},
            "name": {"type": "string", "minLength": 1},
            "category": {"type": "string"},
            "source": {"type": "string"},
            "location": {
                "type": "object",
                "properties": {
                    "place": {"type": "string"},
                    "shelf": {"type": "integer", "minimum": 0}
                },
                "required": ["place", "shelf"]
            },
            "vegan_level": {"type": "integer", "minimum": 0, "maximum": 4},
            "diet_level": {"type": "integer", "minimum": 0, "maximum": 2},
            "size": {
                "type": "object",
                "properties": {
                    "value": {"type": "number", "minimum": 0},
                    "unit": {"type": "string", "minLength": 1}
                },
                "required": ["value", "unit"]
            },
            "best_before_date": {"type": "string", "pattern": r"^\d{2}\.\d{2}\.\d{4}$"},
            "is_staple": {"type": "boolean"},
            "nutritional_values": {
                "type": "object",
                "properties": {
                    "energy": {"type": "number", "minimum": 0},
                    "fats": {
                        "type": "object",
                        "properties": {
                            "total": {"type": "number", "minimum": 0},
                            "saturated": {"type": "number", "minimum": 0}
                        },
                        "required": ["total", "saturated"]
                    },
                    "carbohydrates": {
                        "type": "object",
                        "properties": {
                            "total": {"type": "number", "minimum": 0},
                            "sugar": {"type": "number", "minimum": 0}
                        },
                        "required": ["total", "sugar"]
                    },
                    "proteins": {"type": "number", "minimum": 0},
                    "fiber": {"type": "number", "minimum": 0},
                    "salt": {"type": "number", "minimum": 0}
                },
                "required": ["energy", "fats", "carbohydrates", "proteins", "fiber", "salt"]
            },
            "storage_conditions": string_list(),
            "allergenes": string_list(),
            "personal_distaste": string_list(),
            "synonyms": string_list(),
            "comment": {"type": "string"},
            "price": {"type": "number", "minimum": 0}
        },
        "required": [
            "id", "name", "category", "source", "location", "vegan_level",
            "diet_level", "size", "best_before_date", "is_staple",
            "nutritional_values", "storage_conditions", "allergenes",
            "personal_distaste", "synonyms", "comment", "price"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient::IngredientBuilder;
    use crate::validate::validate_value;

    #[test]
    fn builtin_schema_accepts_builder_output() {
        let ingredient = IngredientBuilder::new("Rice")
            .place("Pantry")
            .shelf("2")
            .size("1", "kg")
            .build();
        let value = serde_json::to_value(&ingredient).unwrap();
        let provider = SchemaProvider::builtin();
        assert!(validate_value(&value, provider.get_schema()).is_ok());
    }

    #[test]
    fn builtin_schema_rejects_empty_name() {
        let ingredient = IngredientBuilder::new("").place("Pantry").build();
        let value = serde_json::to_value(&ingredient).unwrap();
        let provider = SchemaProvider::builtin();
        assert!(validate_value(&value, provider.get_schema()).is_err());
    }

    #[test]
    fn builtin_schema_rejects_missing_required_field() {
        let ingredient = IngredientBuilder::new("Rice").place("Pantry").build();
        let mut value = serde_json::to_value(&ingredient).unwrap();
        value.as_object_mut().unwrap().remove("price");
        let provider = SchemaProvider::builtin();
        assert!(validate_value(&value, provider.get_schema()).is_err());
    }

    #[test]
    fn builtin_schema_rejects_out_of_range_levels() {
        let ingredient = IngredientBuilder::new("Rice").place("Pantry").build();
        let mut value = serde_json::to_value(&ingredient).unwrap();
        value["vegan_level"] = serde_json::json!(5);
        let provider = SchemaProvider::builtin();
        assert!(validate_value(&value, provider.get_schema()).is_err());

        value["vegan_level"] = serde_json::json!(4);
        value["diet_level"] = serde_json::json!(3);
        assert!(validate_value(&value, provider.get_schema()).is_err());
    }

    #[test]
    fn builtin_schema_rejects_malformed_date() {
        let ingredient = IngredientBuilder::new("Rice").place("Pantry").build();
        let mut value = serde_json::to_value(&ingredient).unwrap();
        value["best_before_date"] = serde_json::json!("2026-03-07");
        let provider = SchemaProvider::builtin();
        assert!(validate_value(&value, provider.get_schema()).is_err());
    }

    #[test]
    fn from_file_round_trips_builtin_schema() {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis();
        let path = std::env::temp_dir().join(format!(
            "larder_schema_{}_{}.json",
            std::process::id(),
            timestamp
        ));
        std::fs::write(&path, serde_json::to_string_pretty(&builtin_schema()).unwrap()).unwrap();

        let provider = SchemaProvider::from_file(&path).unwrap();
        assert_eq!(provider.get_schema(), &builtin_schema());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn from_file_reports_missing_file() {
        let result = SchemaProvider::from_file(Path::new("/nonexistent/schema.json"));
        assert!(matches!(result, Err(SchemaError::Io(_))));
    }

    #[test]
    fn from_file_reports_malformed_json() {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis();
        let path = std::env::temp_dir().join(format!(
            "larder_schema_bad_{}_{}.json",
            std::process::id(),
            timestamp
        ));
        std::fs::write(&path, "{not json").unwrap();

        let result = SchemaProvider::from_file(&path);
        assert!(matches!(result, Err(SchemaError::Parse(_))));

        std::fs::remove_file(&path).ok();
    }
}
