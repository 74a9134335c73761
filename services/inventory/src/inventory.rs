//! Item registration and CRUD routes

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::allow;
use crate::error::InventoryResult;
use crate::form::{ItemForm, Payload};
use crate::item::{Item, ItemId, ItemUpdate, NewItem};
use crate::state::{AppState, ItemPath};

/// Router for item operations
pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/register",
            post(register_item).fallback(allow::reject(allow::REGISTER)),
        )
        .route(
            "/inventory",
            get(list_items)
                .post(register_item)
                .fallback(allow::reject(allow::INVENTORY)),
        )
        .route(
            "/inventory/{id}",
            get(get_item)
                .put(update_item)
                .delete(delete_item)
                .fallback(allow::reject(allow::ITEM)),
        )
}

/// Register a new item, storing its photo first if one was sent
async fn register_item(
    State(state): State<AppState>,
    form: ItemForm,
) -> InventoryResult<StatusCode> {
    let item = NewItem::new(form.fields.inventory_name, form.fields.description)?;
    let photo = state.store(form.photo).await?;

    let id = state.registry.register(item.with_photo(photo));
    tracing::info!(id, "item registered");
    Ok(StatusCode::CREATED)
}

/// List every item, keyed by id
async fn list_items(State(state): State<AppState>) -> Json<BTreeMap<ItemId, Item>> {
    Json(state.registry.list())
}

/// Get one item
async fn get_item(
    State(state): State<AppState>,
    ItemPath(id): ItemPath,
) -> InventoryResult<Json<Item>> {
    Ok(Json(state.registry.get(id)?))
}

/// Update an item's name and/or description
async fn update_item(
    State(state): State<AppState>,
    ItemPath(id): ItemPath,
    Payload(update): Payload<ItemUpdate>,
) -> InventoryResult<StatusCode> {
    state.registry.update(id, update)?;
    Ok(StatusCode::OK)
}

/// Delete an item along with its stored photo
async fn delete_item(
    State(state): State<AppState>,
    ItemPath(id): ItemPath,
) -> InventoryResult<StatusCode> {
    let item = state.registry.remove(id)?;
    state.discard(item.photo).await;
    Ok(StatusCode::OK)
}
