//! # Record Store
//!
//! The store is the catalog's single source of truth: a flat JSON document
//! holding an array of ingredient records in insertion order. Every mutation
//! rewrites the whole document, which bounds write cost at O(n) in store
//! size — fine for a personal pantry of hundreds of records.
//!
//! Two policies an implementer must not soften:
//!
//! - **Fail-soft reads.** A missing or malformed backing document yields an
//!   empty store so the user can always start a fresh catalog. Malformed
//!   documents are reported on stderr, never as an error.
//! - **Atomic writes.** The document is replaced via write-temp-then-rename
//!   so a reader never observes a partial write.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::Ingredient;

/// Errors that can occur during store mutations.
#[derive(Debug, Clone)]
pub enum StoreError {
    /// The requested record id is not in the store.
    NotFound,
    /// A record with the same id already exists.
    DuplicateId,
    /// An I/O operation on the backing document failed.
    Io(String),
    /// JSON serialization of the record list failed.
    Serialization(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "Ingredient not found in store"),
            StoreError::DuplicateId => write!(f, "Ingredient with this id already exists"),
            StoreError::Io(msg) => write!(f, "IO error: {}", msg),
            StoreError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// JSON-document-backed collection of all ingredient records.
pub struct IngredientStore {
    path: PathBuf,
    ingredients: Vec<Ingredient>,
}

impl IngredientStore {
    /// Opens the store at the given path, loading whatever records the
    /// backing document holds. Missing or unparsable documents yield an
    /// empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ingredients = load(&path);
        IngredientStore { path, ingredients }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records in insertion order.
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// Looks up a record by id.
    pub fn find_by_id(&self, id: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }

    /// Case-insensitive substring search over record names and categories.
    pub fn search(&self, query: &str) -> Vec<&Ingredient> {
        let query = query.to_lowercase();
        self.ingredients
            .iter()
            .filter(|i| {
                i.name.to_lowercase().contains(&query)
                    || i.category.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Collects the distinct string values found at a dotted field path
    /// (e.g. `category`, `location.place`, `size.unit`) across all records.
    ///
    /// The result is sorted case-insensitively for display; the values keep
    /// their original casing.
    pub fn unique_values(&self, field_path: &str) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();
        for ingredient in &self.ingredients {
            let record = match serde_json::to_value(ingredient) {
                Ok(value) => value,
                Err(_) => continue,
            };
            if let Some(s) = walk_path(&record, field_path).and_then(|v| v.as_str())
                && !s.is_empty()
                && !values.iter().any(|existing| existing.as_str() == s)
            {
                values.push(s.to_string());
            }
        }
        values.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        values
    }

    /// Appends a record and rewrites the backing document.
    ///
    /// Rejects a duplicate id before anything is mutated, so a failed
    /// append leaves both the in-memory list and the document untouched.
    pub fn append(&mut self, ingredient: Ingredient) -> Result<(), StoreError> {
        if self.find_by_id(&ingredient.id).is_some() {
            return Err(StoreError::DuplicateId);
        }
        self.ingredients.push(ingredient);
        self.save()
    }

    /// Replaces the record with the given id wholesale and rewrites the
    /// backing document. The replacement may carry a different id as long
    /// as that id doesn't collide with another record.
    pub fn replace(&mut self, id: &str, ingredient: Ingredient) -> Result<(), StoreError> {
        let index = self
            .ingredients
            .iter()
            .position(|i| i.id == id)
            .ok_or(StoreError::NotFound)?;
        if ingredient.id != id
            && self.ingredients.iter().any(|i| i.id == ingredient.id)
        {
            return Err(StoreError::DuplicateId);
        }
        self.ingredients[index] = ingredient;
        self.save()
    }

    /// Removes the record with the given id and rewrites the backing
    /// document. Returns the removed record.
    pub fn remove(&mut self, id: &str) -> Result<Ingredient, StoreError> {
        let index = self
            .ingredients
            .iter()
            .position(|i| i.id == id)
            .ok_or(StoreError::NotFound)?;
        let removed = self.ingredients.remove(index);
        self.save()?;
        Ok(removed)
    }

    /// Serializes the full record list and atomically replaces the backing
    /// document.
    fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.ingredients)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::Io(e.to_string()))
    }
}

/// Loads the record list from a backing document, failing soft: a missing
/// or malformed document is treated as an empty store.
fn load(path: &Path) -> Vec<Ingredient> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(_) => return Vec::new(),
    };
    match serde_json::from_str(&contents) {
        Ok(ingredients) => ingredients,
        Err(e) => {
            eprintln!(
                "warning: ignoring malformed store document {}: {}",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}

/// Walks a dotted path (`location.place`) into a JSON value.
fn walk_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient::IngredientBuilder;
    use crate::test_utils::test_helpers::{clear_store_file, temp_store_path};

    fn sample(name: &str, place: &str, shelf: &str) -> Ingredient {
        IngredientBuilder::new(name)
            .place(place)
            .shelf(shelf)
            .category("Grains")
            .size("1", "kg")
            .build()
    }

    #[test]
    fn open_missing_document_yields_empty_store() {
        let path = temp_store_path("store", "missing");
        let store = IngredientStore::open(&path);
        assert!(store.is_empty());
        clear_store_file(&path);
    }

    #[test]
    fn open_malformed_document_yields_empty_store() {
        let path = temp_store_path("store", "malformed");
        fs::write(&path, "{this is not json").unwrap();
        let store = IngredientStore::open(&path);
        assert!(store.is_empty());
        clear_store_file(&path);
    }

    #[test]
    fn append_then_find_by_id() {
        let path = temp_store_path("store", "append");
        let mut store = IngredientStore::open(&path);
        let ingredient = sample("Rice", "Pantry", "2");
        let id = ingredient.id.clone();

        store.append(ingredient.clone()).unwrap();
        assert_eq!(store.find_by_id(&id), Some(&ingredient));
        assert_eq!(store.len(), 1);
        clear_store_file(&path);
    }

    #[test]
    fn append_duplicate_id_is_rejected() {
        let path = temp_store_path("store", "duplicate");
        let mut store = IngredientStore::open(&path);
        store.append(sample("Rice", "Pantry", "2")).unwrap();

        let result = store.append(sample("Rice", "Pantry", "2"));
        assert!(matches!(result, Err(StoreError::DuplicateId)));
        assert_eq!(store.len(), 1);
        clear_store_file(&path);
    }

    #[test]
    fn reopen_round_trips_records() {
        let path = temp_store_path("store", "roundtrip");
        let first = sample("Rice", "Pantry", "2");
        let second = sample("Salt", "Cupboard", "0");
        {
            let mut store = IngredientStore::open(&path);
            store.append(first.clone()).unwrap();
            store.append(second.clone()).unwrap();
        }

        let reopened = IngredientStore::open(&path);
        assert_eq!(reopened.ingredients(), &[first, second]);
        clear_store_file(&path);
    }

    #[test]
    fn save_load_is_stable_on_document_content() {
        let path = temp_store_path("store", "stable");
        {
            let mut store = IngredientStore::open(&path);
            store.append(sample("Rice", "Pantry", "2")).unwrap();
            store.append(sample("Salt", "Cupboard", "0")).unwrap();
        }
        let before = fs::read_to_string(&path).unwrap();

        // Reload and force a rewrite through a no-op replace.
        let mut store = IngredientStore::open(&path);
        let record = store.ingredients()[0].clone();
        let id = record.id.clone();
        store.replace(&id, record).unwrap();

        let after = fs::read_to_string(&path).unwrap();
        assert_eq!(before, after);
        clear_store_file(&path);
    }

    #[test]
    fn replace_swaps_record_wholesale() {
        let path = temp_store_path("store", "replace");
        let mut store = IngredientStore::open(&path);
        let original = sample("Rice", "Pantry", "2");
        let id = original.id.clone();
        store.append(original).unwrap();

        let mut updated = sample("Rice", "Pantry", "2");
        updated.comment = "restocked".to_string();
        store.replace(&id, updated.clone()).unwrap();

        assert_eq!(store.find_by_id(&id), Some(&updated));
        assert_eq!(store.len(), 1);
        clear_store_file(&path);
    }

    #[test]
    fn replace_missing_id_is_not_found() {
        let path = temp_store_path("store", "replace_missing");
        let mut store = IngredientStore::open(&path);
        let result = store.replace("nope", sample("Rice", "Pantry", "2"));
        assert!(matches!(result, Err(StoreError::NotFound)));
        clear_store_file(&path);
    }

    #[test]
    fn replace_rejects_id_collision() {
        let path = temp_store_path("store", "replace_collision");
        let mut store = IngredientStore::open(&path);
        let rice = sample("Rice", "Pantry", "2");
        let salt = sample("Salt", "Cupboard", "0");
        let salt_id = salt.id.clone();
        store.append(rice.clone()).unwrap();
        store.append(salt).unwrap();

        // Replacing salt with a record that carries rice's id must fail.
        let result = store.replace(&salt_id, rice);
        assert!(matches!(result, Err(StoreError::DuplicateId)));
        assert_eq!(store.len(), 2);
        clear_store_file(&path);
    }

    #[test]
    fn remove_returns_record_and_shrinks_store() {
        let path = temp_store_path("store", "remove");
        let mut store = IngredientStore::open(&path);
        let ingredient = sample("Rice", "Pantry", "2");
        let id = ingredient.id.clone();
        store.append(ingredient.clone()).unwrap();

        let removed = store.remove(&id).unwrap();
        assert_eq!(removed, ingredient);
        assert!(store.is_empty());
        assert!(matches!(store.remove(&id), Err(StoreError::NotFound)));
        clear_store_file(&path);
    }

    #[test]
    fn search_matches_name_and_category_case_insensitively() {
        let path = temp_store_path("store", "search");
        let mut store = IngredientStore::open(&path);
        store.append(sample("Basmati Rice", "Pantry", "2")).unwrap();
        store.append(sample("Sea Salt", "Cupboard", "0")).unwrap();

        assert_eq!(store.search("rice").len(), 1);
        assert_eq!(store.search("RICE").len(), 1);
        assert_eq!(store.search("grains").len(), 2); // category match
        assert!(store.search("chocolate").is_empty());
        clear_store_file(&path);
    }

    #[test]
    fn unique_values_walks_dotted_paths() {
        let path = temp_store_path("store", "unique");
        let mut store = IngredientStore::open(&path);
        store.append(sample("Rice", "Pantry", "2")).unwrap();
        store.append(sample("Salt", "cellar", "0")).unwrap();
        store.append(sample("Flour", "Cellar", "1")).unwrap();

        let places = store.unique_values("location.place");
        assert_eq!(places, vec!["Cellar", "cellar", "Pantry"]);

        let units = store.unique_values("size.unit");
        assert_eq!(units, vec!["kg"]);

        let categories = store.unique_values("category");
        assert_eq!(categories, vec!["Grains"]);
        clear_store_file(&path);
    }

    #[test]
    fn unique_values_of_unknown_path_is_empty() {
        let path = temp_store_path("store", "unique_unknown");
        let mut store = IngredientStore::open(&path);
        store.append(sample("Rice", "Pantry", "2")).unwrap();
        assert!(store.unique_values("no.such.path").is_empty());
        clear_store_file(&path);
    }
}
