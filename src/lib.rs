//! # Larder: a schema-validated pantry ingredient catalog
//!
//! Larder keeps a personal pantry catalog in a single JSON document. Each
//! entry records what an ingredient is, where it lives, what's in it
//! nutritionally, and when it expires. Collaborators — the bundled CLI, the
//! HTTP API, or any form-based frontend — assemble candidate records; the
//! core validates them against a declarative JSON schema and only then lets
//! them into the store.
//!
//! ## Core Concepts
//!
//! ### Records
//! An [`Ingredient`] is the unit of storage: name, category, location,
//! vegan/diet levels, package size, best-before date, nutritional values
//! (energy always normalized to kJ), and a handful of list-valued fields
//! (allergens, synonyms, storage conditions).
//!
//! ### Identifiers
//! Ids are derived deterministically from the name and storage location
//! (SHA-256 content hash, ten hex characters, guaranteed to contain a
//! letter), so collaborators can recompute them live while the user edits.
//! An externally supplied product code (a scanned GTIN) always takes
//! precedence. See [`generate_id`].
//!
//! ### Validation
//! Candidates are validated against a JSON schema document before they are
//! persisted — structural types, required fields, numeric ranges, and the
//! `dd.mm.yyyy` date format. Nothing invalid ever reaches the store.
//!
//! ### Persistence
//! The store is one flat JSON array rewritten atomically on every mutation
//! (write-temp-then-rename). Reads fail soft: a missing or corrupt document
//! means an empty catalog, never a crash at startup.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Collaborators (larderctl, HTTP clients) │
//! ├─────────────────────────────────────────┤
//! │ HTTP API Layer (Axum routes)            │
//! ├─────────────────────────────────────────┤
//! │ Catalog (validate-before-persist)       │
//! ├─────────────────────────────────────────┤
//! │ Schema Provider │ Ingredient Store      │
//! ├─────────────────────────────────────────┤
//! │ One JSON document on disk               │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage Examples
//!
//! ### Building and validating a candidate
//!
//! ```rust
//! use larder::{Catalog, IngredientBuilder, IngredientStore, SchemaProvider, EnergyUnit};
//!
//! # let dir = std::env::temp_dir().join(format!("larder_doc_{}", std::process::id()));
//! # let path = dir.join("ingredients.json");
//! let store = IngredientStore::open(&path);
//! let mut catalog = Catalog::new(store, SchemaProvider::builtin());
//!
//! let candidate = IngredientBuilder::new("Basmati Rice")
//!     .category("Grains")
//!     .place("Pantry")
//!     .shelf("2")
//!     .size("1", "kg")
//!     .energy("350", EnergyUnit::KiloCalorie) // stored as 1464.4 kJ
//!     .build();
//!
//! let stored = catalog.create(serde_json::to_value(&candidate).unwrap()).unwrap();
//! assert_eq!(catalog.get(&stored.id), Some(&stored));
//! # std::fs::remove_dir_all(&dir).ok();
//! ```
//!
//! ### Deterministic ids
//!
//! ```rust
//! use larder::generate_id;
//!
//! let id = generate_id("Rice", "Pantry", 2);
//! assert_eq!(id, generate_id("rice", "pantry", 2));
//! assert!(id.chars().any(|c| c.is_ascii_alphabetic()));
//! ```

mod catalog;
mod ingredient;
mod ingredient_id;
mod lookup;
mod routes;
mod schema;
mod store;
mod validate;

// CLI utility modules

/// Command-line interface utilities for program termination and output formatting.
pub mod cli_utils;

/// Command-line interface command handlers for the larderctl application.
pub mod commands;

/// HTTP client utilities for interacting with a larder daemon.
pub mod http_utils;

pub use catalog::{Catalog, CatalogError};
pub use ingredient::{
    Carbohydrates, DATE_FORMAT, EnergyUnit, Fats, Ingredient, IngredientBuilder, KCAL_TO_KJ,
    Location, NutritionalValues, Size, normalize_energy, parse_count, parse_level, parse_number,
    split_csv,
};
pub use ingredient_id::{assign_id, generate_id};
pub use lookup::{LookupError, OpenFoodFactsClient, ProductInfo, parse_product, parse_quantity};
pub use routes::{AppState, CreateIngredientResponse, create_ingredient_router};
pub use schema::{SchemaError, SchemaProvider, builtin_schema};
pub use store::{IngredientStore, StoreError};
pub use validate::{ValidationError, validate_value};
