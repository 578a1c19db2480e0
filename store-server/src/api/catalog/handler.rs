//! Catalog API Handlers
//!
//! Create/update/delete are administrative operations and currently ship
//! unguarded; an access-control layer must front these routes before they
//! are reachable externally.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::utils::validation::{
    validate_optional_text, validate_required_text, MAX_NAME_LEN, MAX_TEXT_LEN,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{CatalogItem, CatalogItemCreate, CatalogItemUpdate, ItemFilter};

/// GET /api/catalog - list items with optional filter
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<ItemFilter>,
) -> AppResult<Json<Vec<CatalogItem>>> {
    Ok(Json(state.catalog.find_all(&filter)))
}

/// GET /api/catalog/:id - fetch a single item
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CatalogItem>> {
    let item = state.catalog.find_by_id(&id).ok_or_else(|| {
        AppError::with_message(ErrorCode::ItemNotFound, format!("Catalog item {} not found", id))
            .with_detail("id", id)
    })?;
    Ok(Json(item))
}

/// POST /api/catalog - create an item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CatalogItemCreate>,
) -> AppResult<Json<CatalogItem>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.description, "description", MAX_TEXT_LEN)?;

    let item = state.catalog.create(payload)?;
    tracing::info!(item_id = %item.id, name = %item.name, "Catalog item created");
    Ok(Json(item))
}

/// PUT /api/catalog/:id - update an item
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CatalogItemUpdate>,
) -> AppResult<Json<CatalogItem>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_TEXT_LEN)?;

    let item = state.catalog.update(&id, payload)?;
    tracing::info!(item_id = %id, "Catalog item updated");
    Ok(Json(item))
}

/// DELETE /api/catalog/:id - delete an item
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = state.catalog.delete(&id)?;
    tracing::info!(item_id = %id, "Catalog item deleted");
    Ok(Json(deleted))
}
