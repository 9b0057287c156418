use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use axum::routing::get;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{Catalog, CatalogError};
use crate::Ingredient;

//////////////////////////////////////////////// State /////////////////////////////////////////////

/// Shared state for the ingredient HTTP API.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<Mutex<Catalog>>,
    admin_token: Option<String>,
}

impl AppState {
    /// Creates the shared state. `admin_token` guards update and delete;
    /// when `None`, those endpoints always refuse.
    pub fn new(catalog: Arc<Mutex<Catalog>>, admin_token: Option<String>) -> Self {
        AppState {
            catalog,
            admin_token,
        }
    }
}

/// Checks the `Authorization` header against the configured admin token.
///
/// Authorization is caller-side policy: the catalog itself knows nothing of
/// it, and a refused request never touches the store.
fn authorize(headers: &HeaderMap, admin_token: &Option<String>) -> Result<(), (StatusCode, String)> {
    let expected = admin_token
        .as_deref()
        .ok_or_else(|| (StatusCode::FORBIDDEN, "no admin token configured".to_string()))?;
    let provided = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if provided == expected {
        Ok(())
    } else {
        Err((StatusCode::FORBIDDEN, "unauthorized".to_string()))
    }
}

/// Maps catalog errors onto HTTP responses. Validation and not-found
/// responses carry the constraint description for the user.
fn error_response(e: CatalogError) -> (StatusCode, String) {
    match e {
        CatalogError::Validation(_) | CatalogError::Candidate(_) => {
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        CatalogError::NotFound => (StatusCode::NOT_FOUND, e.to_string()),
        CatalogError::DuplicateId => (StatusCode::CONFLICT, e.to_string()),
        CatalogError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

////////////////////////////////////////////// Routes //////////////////////////////////////////////

/// Response structure for ingredient creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateIngredientResponse {
    /// The record as stored.
    pub ingredient: Ingredient,
    /// Whether the record was created.
    pub created: bool,
}

async fn list_ingredients(State(state): State<AppState>) -> Json<Vec<Ingredient>> {
    let catalog = state.catalog.lock().unwrap();
    Json(catalog.list().to_vec())
}

async fn create_ingredient(
    State(state): State<AppState>,
    Json(candidate): Json<Value>,
) -> Result<(StatusCode, Json<CreateIngredientResponse>), (StatusCode, String)> {
    let mut catalog = state.catalog.lock().unwrap();
    let ingredient = catalog.create(candidate).map_err(error_response)?;
    let response = CreateIngredientResponse {
        ingredient,
        created: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ingredient>, (StatusCode, String)> {
    let catalog = state.catalog.lock().unwrap();
    match catalog.get(&id) {
        Some(ingredient) => Ok(Json(ingredient.clone())),
        None => Err(error_response(CatalogError::NotFound)),
    }
}

async fn search_ingredients(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Ingredient>>, (StatusCode, String)> {
    let query = params
        .get("q")
        .map(String::as_str)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                "query parameter 'q' is required".to_string(),
            )
        })?;
    let catalog = state.catalog.lock().unwrap();
    let results = catalog.search(query).into_iter().cloned().collect();
    Ok(Json(results))
}

async fn suggest_values(
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> Json<Vec<String>> {
    let catalog = state.catalog.lock().unwrap();
    Json(catalog.suggestions(&field))
}

async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(candidate): Json<Value>,
) -> Result<Json<Ingredient>, (StatusCode, String)> {
    authorize(&headers, &state.admin_token)?;
    let mut catalog = state.catalog.lock().unwrap();
    let ingredient = catalog.update(&id, candidate).map_err(error_response)?;
    Ok(Json(ingredient))
}

async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, (StatusCode, String)> {
    authorize(&headers, &state.admin_token)?;
    let mut catalog = state.catalog.lock().unwrap();
    catalog.remove(&id).map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

////////////////////////////////////////////// Router //////////////////////////////////////////////

/// Creates the ingredient API router.
///
/// # Routes
/// - `GET    /ingredients` - List all ingredients
/// - `POST   /ingredients` - Create an ingredient (validated first)
/// - `GET    /ingredients/search?q=` - Substring search on name/category
/// - `GET    /ingredients/suggestions/:field` - Distinct values at a dotted field path
/// - `GET    /ingredients/:id` - Get an ingredient
/// - `PUT    /ingredients/:id` - Replace an ingredient (admin)
/// - `DELETE /ingredients/:id` - Delete an ingredient (admin)
pub fn create_ingredient_router(
    catalog: Arc<Mutex<Catalog>>,
    admin_token: Option<String>,
) -> Router {
    let state = AppState::new(catalog, admin_token);
    Router::new()
        .route(
            "/ingredients",
            get(list_ingredients).post(create_ingredient),
        )
        .route("/ingredients/search", get(search_ingredients))
        .route("/ingredients/suggestions/:field", get(suggest_values))
        .route(
            "/ingredients/:id",
            get(get_ingredient)
                .put(update_ingredient)
                .delete(delete_ingredient),
        )
        .with_state(state)
}
