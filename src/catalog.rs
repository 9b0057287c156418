//! # Catalog
//!
//! The catalog ties the schema provider to the record store and enforces
//! the one invariant everything else depends on: **no candidate reaches the
//! store without passing schema validation**. Collaborators (HTTP handlers,
//! the CLI) talk to the catalog, never to the store directly.
//!
//! ```text
//! Collaborator (HTTP / CLI)
//!      ↓ candidate (serde_json::Value)
//! Catalog ── validate against SchemaProvider
//!      ↓ typed Ingredient
//! IngredientStore ── append/replace/remove + full-document rewrite
//! ```

use serde_json::Value;

use crate::schema::SchemaProvider;
use crate::store::{IngredientStore, StoreError};
use crate::validate::{ValidationError, validate_value};
use crate::Ingredient;

/// Errors surfaced by catalog operations.
#[derive(Debug)]
pub enum CatalogError {
    /// The candidate failed schema validation; the message describes the
    /// violated constraint.
    Validation(ValidationError),
    /// The candidate passed the schema but could not be decoded into the
    /// record model. Points at a schema/model mismatch.
    Candidate(String),
    /// The target record id is not in the store.
    NotFound,
    /// A record with the candidate's id already exists.
    DuplicateId,
    /// The backing document could not be rewritten.
    Store(StoreError),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Validation(e) => write!(f, "Validation failed: {}", e),
            CatalogError::Candidate(msg) => write!(f, "Candidate did not match the record model: {}", msg),
            CatalogError::NotFound => write!(f, "Ingredient not found"),
            CatalogError::DuplicateId => write!(f, "Ingredient with this id already exists"),
            CatalogError::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<StoreError> for CatalogError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => CatalogError::NotFound,
            StoreError::DuplicateId => CatalogError::DuplicateId,
            other => CatalogError::Store(other),
        }
    }
}

impl From<ValidationError> for CatalogError {
    fn from(e: ValidationError) -> Self {
        CatalogError::Validation(e)
    }
}

/// The schema-guarded ingredient catalog.
pub struct Catalog {
    store: IngredientStore,
    schema: SchemaProvider,
}

impl Catalog {
    /// Creates a catalog over an opened store and a loaded schema.
    pub fn new(store: IngredientStore, schema: SchemaProvider) -> Self {
        Catalog { store, schema }
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[Ingredient] {
        self.store.ingredients()
    }

    /// Looks up a record by id.
    pub fn get(&self, id: &str) -> Option<&Ingredient> {
        self.store.find_by_id(id)
    }

    /// Case-insensitive substring search over names and categories.
    pub fn search(&self, query: &str) -> Vec<&Ingredient> {
        self.store.search(query)
    }

    /// Distinct values at a dotted field path, for suggestion lists.
    pub fn suggestions(&self, field_path: &str) -> Vec<String> {
        self.store.unique_values(field_path)
    }

    /// Validates a candidate and appends it to the store.
    ///
    /// Returns the stored record. On any error nothing is persisted.
    pub fn create(&mut self, candidate: Value) -> Result<Ingredient, CatalogError> {
        let ingredient = self.check(candidate)?;
        self.store.append(ingredient.clone())?;
        Ok(ingredient)
    }

    /// Validates a candidate and replaces the record with the given id
    /// wholesale. There is no field-level patch.
    pub fn update(&mut self, id: &str, candidate: Value) -> Result<Ingredient, CatalogError> {
        let ingredient = self.check(candidate)?;
        self.store.replace(id, ingredient.clone())?;
        Ok(ingredient)
    }

    /// Removes the record with the given id, returning it.
    pub fn remove(&mut self, id: &str) -> Result<Ingredient, CatalogError> {
        Ok(self.store.remove(id)?)
    }

    /// Validation gate: schema first, then decode into the typed model.
    fn check(&self, candidate: Value) -> Result<Ingredient, CatalogError> {
        validate_value(&candidate, self.schema.get_schema())?;
        serde_json::from_value(candidate).map_err(|e| CatalogError::Candidate(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient::IngredientBuilder;
    use crate::test_utils::test_helpers::{clear_store_file, temp_store_path};

    fn catalog(module: &str, suffix: &str) -> (Catalog, std::path::PathBuf) {
        let path = temp_store_path(module, suffix);
        let store = IngredientStore::open(&path);
        (Catalog::new(store, SchemaProvider::builtin()), path)
    }

    fn candidate(name: &str) -> Value {
        let ingredient = IngredientBuilder::new(name)
            .place("Pantry")
            .shelf("2")
            .size("1", "kg")
            .build();
        serde_json::to_value(&ingredient).unwrap()
    }

    #[test]
    fn create_validates_then_persists() {
        let (mut catalog, path) = catalog("catalog", "create");
        let stored = catalog.create(candidate("Rice")).unwrap();

        assert_eq!(catalog.get(&stored.id), Some(&stored));
        assert!(!stored.id.is_empty());
        assert!(stored.id.chars().any(|c| c.is_ascii_alphanumeric()));
        clear_store_file(&path);
    }

    #[test]
    fn invalid_candidate_is_never_persisted() {
        let (mut catalog, path) = catalog("catalog", "invalid");
        let mut bad = candidate("Rice");
        bad.as_object_mut().unwrap().remove("name");

        let result = catalog.create(bad);
        assert!(matches!(result, Err(CatalogError::Validation(_))));
        assert!(catalog.list().is_empty());
        clear_store_file(&path);
    }

    #[test]
    fn duplicate_id_create_is_rejected_before_mutation() {
        let (mut catalog, path) = catalog("catalog", "dup");
        catalog.create(candidate("Rice")).unwrap();

        let result = catalog.create(candidate("Rice"));
        assert!(matches!(result, Err(CatalogError::DuplicateId)));
        assert_eq!(catalog.list().len(), 1);
        clear_store_file(&path);
    }

    #[test]
    fn update_replaces_whole_record() {
        let (mut catalog, path) = catalog("catalog", "update");
        let stored = catalog.create(candidate("Rice")).unwrap();

        let mut replacement = candidate("Rice");
        replacement["comment"] = serde_json::json!("restocked");
        let updated = catalog.update(&stored.id, replacement).unwrap();

        assert_eq!(updated.comment, "restocked");
        assert_eq!(catalog.get(&stored.id), Some(&updated));
        clear_store_file(&path);
    }

    #[test]
    fn update_missing_record_is_not_found() {
        let (mut catalog, path) = catalog("catalog", "update_missing");
        let result = catalog.update("nope", candidate("Rice"));
        assert!(matches!(result, Err(CatalogError::NotFound)));
        clear_store_file(&path);
    }

    #[test]
    fn update_invalid_candidate_leaves_store_unchanged() {
        let (mut catalog, path) = catalog("catalog", "update_invalid");
        let stored = catalog.create(candidate("Rice")).unwrap();

        let mut bad = candidate("Rice");
        bad["price"] = serde_json::json!(-1.0);
        let result = catalog.update(&stored.id, bad);

        assert!(matches!(result, Err(CatalogError::Validation(_))));
        assert_eq!(catalog.get(&stored.id), Some(&stored));
        clear_store_file(&path);
    }

    #[test]
    fn remove_then_get_is_absent() {
        let (mut catalog, path) = catalog("catalog", "remove");
        let stored = catalog.create(candidate("Rice")).unwrap();

        catalog.remove(&stored.id).unwrap();
        assert!(catalog.get(&stored.id).is_none());
        assert!(matches!(
            catalog.remove(&stored.id),
            Err(CatalogError::NotFound)
        ));
        clear_store_file(&path);
    }

    #[test]
    fn search_and_suggestions_pass_through() {
        let (mut catalog, path) = catalog("catalog", "search");
        catalog.create(candidate("Basmati Rice")).unwrap();
        catalog.create(candidate("Salt")).unwrap();

        assert_eq!(catalog.search("basmati").len(), 1);
        assert_eq!(catalog.suggestions("location.place"), vec!["Pantry"]);
        clear_store_file(&path);
    }

    #[test]
    fn error_messages_describe_the_constraint() {
        let (mut catalog, path) = catalog("catalog", "messages");
        let mut bad = candidate("Rice");
        bad["vegan_level"] = serde_json::json!(9);

        let message = catalog.create(bad).unwrap_err().to_string();
        assert!(message.contains("vegan_level"), "got: {}", message);
        assert!(message.contains("maximum"), "got: {}", message);
        clear_store_file(&path);
    }
}
