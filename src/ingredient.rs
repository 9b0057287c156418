use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ingredient_id::assign_id;

/// Conversion factor from kilocalories to kilojoules.
pub const KCAL_TO_KJ: f64 = 4.184;

/// Date format used for best-before dates throughout the catalog.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

////////////////////////////////////////////// Records /////////////////////////////////////////////

/// Where an ingredient is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Storage place, e.g. "Pantry" or "Cellar".
    pub place: String,
    /// Shelf number within the place, counted from zero.
    pub shelf: u32,
}

/// Package size: a quantity and its unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Numeric quantity, non-negative.
    pub value: f64,
    /// Unit string, e.g. "g", "kg", "ml", "l", "piece".
    pub unit: String,
}

/// Fat content per 100g.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Fats {
    /// Total fat in grams per 100g.
    pub total: f64,
    /// Saturated fat in grams per 100g.
    pub saturated: f64,
}

/// Carbohydrate content per 100g.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Carbohydrates {
    /// Total carbohydrates in grams per 100g.
    pub total: f64,
    /// Sugar in grams per 100g.
    pub sugar: f64,
}

/// Nutritional values per 100g. Energy is always stored in kilojoules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct NutritionalValues {
    /// Energy in kJ per 100g.
    pub energy: f64,
    /// Fat content.
    pub fats: Fats,
    /// Carbohydrate content.
    pub carbohydrates: Carbohydrates,
    /// Protein in grams per 100g.
    pub proteins: f64,
    /// Fiber in grams per 100g.
    pub fiber: f64,
    /// Salt in grams per 100g.
    pub salt: f64,
}

/// One ingredient's full metadata entry, the unit of storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique identifier within the store. Either an external product code
    /// or derived from name and location, see [`crate::generate_id`].
    pub id: String,
    /// Ingredient name, non-empty.
    pub name: String,
    /// Free-text category, suggestion-backed.
    pub category: String,
    /// Where the ingredient was bought, suggestion-backed.
    pub source: String,
    /// Storage location.
    pub location: Location,
    /// Ordinal vegan severity code, 0 (non-vegan) through 4 (vegan).
    pub vegan_level: u8,
    /// Ordinal diet code: 0 unrestricted, 1 restricted, 2 prohibited.
    pub diet_level: u8,
    /// Package size.
    pub size: Size,
    /// Best-before date formatted `dd.mm.yyyy`.
    pub best_before_date: String,
    /// Whether this is a staple that should always be in stock.
    pub is_staple: bool,
    /// Nutritional values per 100g, energy normalized to kJ.
    pub nutritional_values: NutritionalValues,
    /// Storage conditions, e.g. "cool", "dry".
    pub storage_conditions: Vec<String>,
    /// Allergens contained in the ingredient.
    pub allergenes: Vec<String>,
    /// Household members who dislike this ingredient.
    pub personal_distaste: Vec<String>,
    /// Alternative names.
    pub synonyms: Vec<String>,
    /// Free-form comment.
    pub comment: String,
    /// Price in the local currency, non-negative.
    pub price: f64,
}

/////////////////////////////////////////// Energy units ///////////////////////////////////////////

/// Unit an energy value was entered in. Only used on the way into the
/// catalog; stored records always carry kJ and no unit tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnergyUnit {
    /// Kilojoules, the canonical unit.
    #[default]
    #[serde(rename = "kJ")]
    KiloJoule,
    /// Kilocalories, converted on entry.
    #[serde(rename = "kcal")]
    KiloCalorie,
}

/// Normalizes an energy value to kilojoules.
pub fn normalize_energy(value: f64, unit: EnergyUnit) -> f64 {
    match unit {
        EnergyUnit::KiloJoule => value,
        EnergyUnit::KiloCalorie => value * KCAL_TO_KJ,
    }
}

//////////////////////////////////////////// Raw parsing ///////////////////////////////////////////

/// Parses a numeric form value, accepting a comma as decimal separator.
/// Anything unparsable falls back to zero.
pub fn parse_number(raw: &str) -> f64 {
    raw.trim().replace(',', ".").parse().unwrap_or(0.0)
}

/// Parses a non-negative integer form value, falling back to zero.
pub fn parse_count(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

/// Parses a level selection like `"2: ovo-lacto-vegetarian"` down to its
/// leading integer. Non-numeric input falls back to zero.
pub fn parse_level(raw: &str) -> u8 {
    raw.split(':')
        .next()
        .and_then(|digits| digits.trim().parse().ok())
        .unwrap_or(0)
}

/// Splits a comma-separated form value into trimmed, non-empty entries.
pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

///////////////////////////////////////////// Builder //////////////////////////////////////////////

/// Converts raw collaborator input into a typed [`Ingredient`].
///
/// Collaborators hand over whatever their widgets or request fields produce
/// as strings; the builder applies the defined parse-failure fallbacks
/// (non-numeric becomes zero), normalizes energy to kJ, and assigns the id.
/// The result is a *candidate*: it still has to pass schema validation
/// before the store accepts it.
#[derive(Debug, Clone, Default)]
pub struct IngredientBuilder {
    product_code: Option<String>,
    name: String,
    category: String,
    source: String,
    place: String,
    shelf: String,
    vegan_level: String,
    diet_level: String,
    size_value: String,
    size_unit: String,
    best_before_date: Option<NaiveDate>,
    is_staple: bool,
    energy: String,
    energy_unit: EnergyUnit,
    fat_total: String,
    fat_saturated: String,
    carb_total: String,
    carb_sugar: String,
    proteins: String,
    fiber: String,
    salt: String,
    storage_conditions: String,
    allergenes: String,
    personal_distaste: String,
    synonyms: String,
    comment: String,
    price: String,
}

impl IngredientBuilder {
    /// Starts a builder for an ingredient with the given name.
    pub fn new(name: &str) -> Self {
        IngredientBuilder {
            name: name.trim().to_string(),
            size_unit: "g".to_string(),
            ..Default::default()
        }
    }

    /// Supplies an external product code (e.g. a GTIN). When present it
    /// becomes the id verbatim and suppresses id derivation.
    pub fn product_code(mut self, code: &str) -> Self {
        self.product_code = Some(code.trim().to_string());
        self
    }

    /// Sets the category.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.trim().to_string();
        self
    }

    /// Sets the source.
    pub fn source(mut self, source: &str) -> Self {
        self.source = source.trim().to_string();
        self
    }

    /// Sets the storage place.
    pub fn place(mut self, place: &str) -> Self {
        self.place = place.trim().to_string();
        self
    }

    /// Sets the shelf number from its raw form value.
    pub fn shelf(mut self, shelf: &str) -> Self {
        self.shelf = shelf.to_string();
        self
    }

    /// Sets the vegan level from a selection like `"4: vegan"`.
    pub fn vegan_level(mut self, selection: &str) -> Self {
        self.vegan_level = selection.to_string();
        self
    }

    /// Sets the diet level from a selection like `"1: restricted"`.
    pub fn diet_level(mut self, selection: &str) -> Self {
        self.diet_level = selection.to_string();
        self
    }

    /// Sets the package size from raw value and unit.
    pub fn size(mut self, value: &str, unit: &str) -> Self {
        self.size_value = value.to_string();
        self.size_unit = unit.trim().to_string();
        self
    }

    /// Sets the best-before date. Defaults to today when never called.
    pub fn best_before(mut self, date: NaiveDate) -> Self {
        self.best_before_date = Some(date);
        self
    }

    /// Marks the ingredient as a staple.
    pub fn staple(mut self, is_staple: bool) -> Self {
        self.is_staple = is_staple;
        self
    }

    /// Sets the energy value together with the unit it was entered in.
    pub fn energy(mut self, value: &str, unit: EnergyUnit) -> Self {
        self.energy = value.to_string();
        self.energy_unit = unit;
        self
    }

    /// Sets total and saturated fat.
    pub fn fats(mut self, total: &str, saturated: &str) -> Self {
        self.fat_total = total.to_string();
        self.fat_saturated = saturated.to_string();
        self
    }

    /// Sets total carbohydrates and sugar.
    pub fn carbohydrates(mut self, total: &str, sugar: &str) -> Self {
        self.carb_total = total.to_string();
        self.carb_sugar = sugar.to_string();
        self
    }

    /// Sets protein content.
    pub fn proteins(mut self, proteins: &str) -> Self {
        self.proteins = proteins.to_string();
        self
    }

    /// Sets fiber content.
    pub fn fiber(mut self, fiber: &str) -> Self {
        self.fiber = fiber.to_string();
        self
    }

    /// Sets salt content.
    pub fn salt(mut self, salt: &str) -> Self {
        self.salt = salt.to_string();
        self
    }

    /// Sets storage conditions from a comma-separated value.
    pub fn storage_conditions(mut self, csv: &str) -> Self {
        self.storage_conditions = csv.to_string();
        self
    }

    /// Sets allergens from a comma-separated value.
    pub fn allergenes(mut self, csv: &str) -> Self {
        self.allergenes = csv.to_string();
        self
    }

    /// Sets personal distaste entries from a comma-separated value.
    pub fn personal_distaste(mut self, csv: &str) -> Self {
        self.personal_distaste = csv.to_string();
        self
    }

    /// Sets synonyms from a comma-separated value.
    pub fn synonyms(mut self, csv: &str) -> Self {
        self.synonyms = csv.to_string();
        self
    }

    /// Sets the free-form comment.
    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = comment.trim().to_string();
        self
    }

    /// Sets the price from its raw form value.
    pub fn price(mut self, price: &str) -> Self {
        self.price = price.to_string();
        self
    }

    /// Builds the candidate record: parses all raw fields with their
    /// fallbacks, normalizes energy to kJ, and assigns the id.
    pub fn build(self) -> Ingredient {
        let shelf = parse_count(&self.shelf);
        let id = assign_id(self.product_code.as_deref(), &self.name, &self.place, shelf);
        let best_before = self
            .best_before_date
            .unwrap_or_else(|| Utc::now().date_naive());
        Ingredient {
            id,
            name: self.name,
            category: self.category,
            source: self.source,
            location: Location {
                place: self.place,
                shelf,
            },
            vegan_level: parse_level(&self.vegan_level),
            diet_level: parse_level(&self.diet_level),
            size: Size {
                value: parse_number(&self.size_value),
                unit: self.size_unit,
            },
            best_before_date: best_before.format(DATE_FORMAT).to_string(),
            is_staple: self.is_staple,
            nutritional_values: NutritionalValues {
                energy: normalize_energy(parse_number(&self.energy), self.energy_unit),
                fats: Fats {
                    total: parse_number(&self.fat_total),
                    saturated: parse_number(&self.fat_saturated),
                },
                carbohydrates: Carbohydrates {
                    total: parse_number(&self.carb_total),
                    sugar: parse_number(&self.carb_sugar),
                },
                proteins: parse_number(&self.proteins),
                fiber: parse_number(&self.fiber),
                salt: parse_number(&self.salt),
            },
            storage_conditions: split_csv(&self.storage_conditions),
            allergenes: split_csv(&self.allergenes),
            personal_distaste: split_csv(&self.personal_distaste),
            synonyms: split_csv(&self.synonyms),
            comment: self.comment,
            price: parse_number(&self.price),
        }
    }
}
