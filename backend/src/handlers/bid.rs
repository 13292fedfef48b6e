//! HTTP handlers for bidding and settlement endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use shared::PlaceBidInput;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::bid::{Bid, BidService, BidWithBatch, BidWithProfile};
use crate::services::settlement::{AcceptBidInput, SettlementOutcome, SettlementService};
use crate::AppState;

/// Place a bid on a batch
pub async fn place_bid(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(batch_id): Path<Uuid>,
    Json(input): Json<PlaceBidInput>,
) -> AppResult<Json<Bid>> {
    let service = BidService::new(state.db);
    let bid = service
        .place_bid(current_user.0.user_id, batch_id, input)
        .await?;
    Ok(Json(bid))
}

/// List active bids for a batch, best offer first
pub async fn list_bids_for_batch(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(batch_id): Path<Uuid>,
) -> AppResult<Json<Vec<BidWithProfile>>> {
    let service = BidService::new(state.db);
    let bids = service.list_bids_for_batch(batch_id).await?;
    Ok(Json(bids))
}

/// List the calling distributor's bids
pub async fn list_my_bids(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<BidWithBatch>>> {
    let service = BidService::new(state.db);
    let bids = service
        .list_bids_for_distributor(current_user.0.user_id)
        .await?;
    Ok(Json(bids))
}

/// Accept a bid on behalf of the batch's owning farmer
pub async fn accept_bid(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(bid_id): Path<Uuid>,
    Json(input): Json<AcceptBidInput>,
) -> AppResult<Json<SettlementOutcome>> {
    let service = SettlementService::new(state.db);
    let outcome = service
        .accept_bid(current_user.0.user_id, bid_id, input)
        .await?;
    Ok(Json(outcome))
}
