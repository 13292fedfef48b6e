//! HTTP handlers for inventory and purchase endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use shared::PurchaseInput;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::inventory::{
    AvailableInventory, InventoryItem, InventoryService, InventoryWithBatch, Purchase,
    PurchaseWithDetails,
};
use crate::AppState;

/// List the calling distributor's inventory lots
pub async fn list_inventory(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<InventoryWithBatch>>> {
    let service = InventoryService::new(state.db);
    let items = service.list_for_distributor(current_user.0.user_id).await?;
    Ok(Json(items))
}

/// List lots with stock remaining (the retailer marketplace)
pub async fn list_available_inventory(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<AvailableInventory>>> {
    let service = InventoryService::new(state.db);
    let items = service.list_available().await?;
    Ok(Json(items))
}

/// Get a single inventory lot
pub async fn get_inventory_item(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(inventory_id): Path<Uuid>,
) -> AppResult<Json<InventoryItem>> {
    let service = InventoryService::new(state.db);
    let item = service.get_item(inventory_id).await?;
    Ok(Json(item))
}

/// Purchase a quantity from a distributor's lot
pub async fn purchase(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(inventory_id): Path<Uuid>,
    Json(input): Json<PurchaseInput>,
) -> AppResult<Json<Purchase>> {
    let service = InventoryService::new(state.db);
    let purchase = service
        .purchase(current_user.0.user_id, inventory_id, input)
        .await?;
    Ok(Json(purchase))
}

/// List the calling retailer's purchases
pub async fn list_purchases(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<PurchaseWithDetails>>> {
    let service = InventoryService::new(state.db);
    let purchases = service
        .list_purchases_for_retailer(current_user.0.user_id)
        .await?;
    Ok(Json(purchases))
}
