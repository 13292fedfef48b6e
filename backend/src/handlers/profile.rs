//! HTTP handlers for profile lookups

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::profile::{Profile, ProfileService};
use crate::AppState;

/// Fetch a user's profile
pub async fn get_profile(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Profile>> {
    let service = ProfileService::new(state.db);
    let profile = service.get_profile(user_id).await?;
    Ok(Json(profile))
}
