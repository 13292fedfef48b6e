//! HTTP handlers for batch lifecycle endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use shared::{CertifyBatchInput, CreateBatchInput};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::batch::{Batch, BatchService};
use crate::AppState;

/// Register a new batch for the calling farmer
pub async fn create_batch(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateBatchInput>,
) -> AppResult<Json<Batch>> {
    let service = BatchService::new(state.db);
    let batch = service.create_batch(current_user.0.user_id, input).await?;
    Ok(Json(batch))
}

/// List all batches
pub async fn list_batches(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Batch>>> {
    let service = BatchService::new(state.db);
    let batches = service.list_batches().await?;
    Ok(Json(batches))
}

/// List the calling farmer's batches
pub async fn list_my_batches(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Batch>>> {
    let service = BatchService::new(state.db);
    let batches = service
        .list_batches_for_farmer(current_user.0.user_id)
        .await?;
    Ok(Json(batches))
}

/// List batches open for bidding
pub async fn list_open_batches(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Batch>>> {
    let service = BatchService::new(state.db);
    let batches = service.list_open_batches().await?;
    Ok(Json(batches))
}

/// List batches awaiting inspection
pub async fn list_pending_batches(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Batch>>> {
    let service = BatchService::new(state.db);
    let batches = service.list_pending_batches().await?;
    Ok(Json(batches))
}

/// Get a single batch
pub async fn get_batch(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(batch_id): Path<Uuid>,
) -> AppResult<Json<Batch>> {
    let service = BatchService::new(state.db);
    let batch = service.get_batch(batch_id).await?;
    Ok(Json(batch))
}

/// Record an inspection verdict on a pending batch
pub async fn certify_batch(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(batch_id): Path<Uuid>,
    Json(input): Json<CertifyBatchInput>,
) -> AppResult<Json<Batch>> {
    let service = BatchService::new(state.db);
    let batch = service
        .certify_batch(current_user.0.user_id, batch_id, input)
        .await?;
    Ok(Json(batch))
}

/// Input for toggling sale availability
#[derive(Debug, Deserialize)]
pub struct SetAvailabilityInput {
    pub is_available_for_sale: bool,
}

/// Toggle whether a batch is listed for sale
pub async fn set_availability(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(batch_id): Path<Uuid>,
    Json(input): Json<SetAvailabilityInput>,
) -> AppResult<Json<Batch>> {
    let service = BatchService::new(state.db);
    let batch = service
        .set_availability(
            current_user.0.user_id,
            batch_id,
            input.is_available_for_sale,
        )
        .await?;
    Ok(Json(batch))
}
