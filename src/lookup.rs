//! Optional external product lookup.
//!
//! Given a product code (GTIN/barcode) the lookup client asks the Open Food
//! Facts database for whatever it knows about the product and maps the
//! answer onto partial record fields. The catalog treats this collaborator
//! as "may be absent rather than must succeed": lookup results only pre-fill
//! a candidate, they never bypass validation, and a failed or empty lookup
//! leaves the user typing fields by hand.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ingredient::{Carbohydrates, Fats, NutritionalValues, Size, KCAL_TO_KJ};

const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";

/// Errors that can occur while querying the product database.
#[derive(Debug)]
pub enum LookupError {
    /// The HTTP request failed.
    Http(String),
    /// The response body was not the JSON shape we expect.
    Malformed(String),
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::Http(msg) => write!(f, "Lookup request failed: {}", msg),
            LookupError::Malformed(msg) => write!(f, "Lookup response malformed: {}", msg),
        }
    }
}

impl std::error::Error for LookupError {}

/// Partial record fields recovered from the product database.
///
/// Everything is optional; whatever is present pre-fills the corresponding
/// candidate field. Energy inside `nutritional_values` is already
/// normalized to kJ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductInfo {
    /// Product name.
    pub name: Option<String>,
    /// Brand name, informational only.
    pub brand: Option<String>,
    /// Package size parsed from the quantity string.
    pub size: Option<Size>,
    /// Alternative names.
    pub synonyms: Vec<String>,
    /// Allergens with their country prefix stripped.
    pub allergenes: Vec<String>,
    /// Nutriments per 100g, energy in kJ.
    pub nutritional_values: Option<NutritionalValues>,
}

/// HTTP client for the Open Food Facts product database.
pub struct OpenFoodFactsClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenFoodFactsClient {
    /// Creates a client against the public Open Food Facts instance.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Creates a client against a specific instance (used by tests).
    pub fn with_base_url(base_url: String) -> Self {
        OpenFoodFactsClient {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Looks up a product by its code. `Ok(None)` means the database has
    /// no record of the product; only transport failures are errors.
    pub async fn lookup(&self, code: &str) -> Result<Option<ProductInfo>, LookupError> {
        let url = format!("{}/api/v0/product/{}", self.base_url, code.trim());
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| LookupError::Malformed(e.to_string()))?;
        Ok(parse_product(&body))
    }
}

impl Default for OpenFoodFactsClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps an Open Food Facts response body onto partial record fields.
/// Returns `None` when the body carries no product.
pub fn parse_product(body: &Value) -> Option<ProductInfo> {
    let product = body.get("product")?;

    let name = product
        .get("product_name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from);
    let brand = product
        .get("brands")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from);
    let size = product
        .get("quantity")
        .and_then(Value::as_str)
        .and_then(parse_quantity);
    let synonyms = product
        .get("generic_name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(|s| vec![s.to_string()])
        .unwrap_or_default();
    let allergenes = product
        .get("allergens_tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(strip_country_prefix)
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();
    let nutritional_values = product.get("nutriments").map(parse_nutriments);

    Some(ProductInfo {
        name,
        brand,
        size,
        synonyms,
        allergenes,
        nutritional_values,
    })
}

/// Parses a quantity string like `"500 g"` or `"0,5 l"` into a size.
pub fn parse_quantity(text: &str) -> Option<Size> {
    static QUANTITY: OnceLock<Regex> = OnceLock::new();
    let regex = QUANTITY.get_or_init(|| {
        Regex::new(r"^\s*([\d,.]+)\s*([a-zA-Z]*)").expect("quantity regex is valid")
    });

    let captures = regex.captures(text)?;
    let value: f64 = captures[1].replace(',', ".").parse().ok()?;
    let unit = captures[2].to_string();
    if unit.is_empty() {
        return None;
    }
    Some(Size { value, unit })
}

/// Drops the country prefix from an allergen tag (`"en:milk"` -> `"milk"`).
fn strip_country_prefix(tag: &str) -> String {
    tag.rsplit(':').next().unwrap_or(tag).to_string()
}

/// Maps Open Food Facts nutriments onto nutritional values, converting the
/// kcal energy figure to kJ.
fn parse_nutriments(nutriments: &Value) -> NutritionalValues {
    let field = |key: &str| nutriments.get(key).and_then(Value::as_f64).unwrap_or(0.0);
    NutritionalValues {
        energy: field("energy-kcal_100g") * KCAL_TO_KJ,
        fats: Fats {
            total: field("fat_100g"),
            saturated: field("saturated-fat_100g"),
        },
        carbohydrates: Carbohydrates {
            total: field("carbohydrates_100g"),
            sugar: field("sugars_100g"),
        },
        proteins: field("proteins_100g"),
        fiber: field("fiber_100g"),
        salt: field("salt_100g"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quantity_parsing_handles_units_and_commas() {
        assert_eq!(
            parse_quantity("500 g"),
            Some(Size {
                value: 500.0,
                unit: "g".to_string()
            })
        );
        assert_eq!(
            parse_quantity("0,5l"),
            Some(Size {
                value: 0.5,
                unit: "l".to_string()
            })
        );
        assert_eq!(
            parse_quantity("  1.5 kg extra"),
            Some(Size {
                value: 1.5,
                unit: "kg".to_string()
            })
        );
    }

    #[test]
    fn quantity_parsing_rejects_garbage() {
        assert_eq!(parse_quantity("a handful"), None);
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("500"), None); // no unit
    }

    #[test]
    fn product_parsing_maps_fields() {
        let body = json!({
            "product": {
                "product_name": "Basmati Reis",
                "brands": "Beste Marke",
                "quantity": "1 kg",
                "generic_name": "Reis",
                "allergens_tags": ["en:gluten", "de:senf"],
                "nutriments": {
                    "energy-kcal_100g": 350.0,
                    "fat_100g": 0.5,
                    "saturated-fat_100g": 0.1,
                    "carbohydrates_100g": 78.0,
                    "sugars_100g": 0.2,
                    "proteins_100g": 7.5,
                    "fiber_100g": 1.3,
                    "salt_100g": 0.01
                }
            }
        });

        let info = parse_product(&body).unwrap();
        assert_eq!(info.name.as_deref(), Some("Basmati Reis"));
        assert_eq!(info.brand.as_deref(), Some("Beste Marke"));
        assert_eq!(
            info.size,
            Some(Size {
                value: 1.0,
                unit: "kg".to_string()
            })
        );
        assert_eq!(info.synonyms, vec!["Reis"]);
        assert_eq!(info.allergenes, vec!["gluten", "senf"]);

        let nutriments = info.nutritional_values.unwrap();
        assert_eq!(nutriments.energy, 350.0 * KCAL_TO_KJ);
        assert_eq!(nutriments.carbohydrates.total, 78.0);
        assert_eq!(nutriments.salt, 0.01);
    }

    #[test]
    fn product_parsing_tolerates_sparse_records() {
        let body = json!({"product": {"product_name": "Mystery"}});
        let info = parse_product(&body).unwrap();
        assert_eq!(info.name.as_deref(), Some("Mystery"));
        assert_eq!(info.size, None);
        assert!(info.allergenes.is_empty());
        assert_eq!(info.nutritional_values, None);
    }

    #[test]
    fn missing_product_yields_none() {
        assert_eq!(parse_product(&json!({"status": 0})), None);
    }
}
