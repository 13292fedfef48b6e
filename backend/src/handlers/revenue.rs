//! HTTP handlers for revenue endpoints

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::revenue::{RevenueEntry, RevenueService, RevenueTotal};
use crate::AppState;

/// Total revenue credited to the calling user
pub async fn get_total_revenue(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<RevenueTotal>> {
    let service = RevenueService::new(state.db);
    let total = service.total_revenue(current_user.0.user_id).await?;
    Ok(Json(total))
}

/// The calling user's revenue entries, newest first
pub async fn get_revenue_entries(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<RevenueEntry>>> {
    let service = RevenueService::new(state.db);
    let entries = service.list_entries(current_user.0.user_id).await?;
    Ok(Json(entries))
}
