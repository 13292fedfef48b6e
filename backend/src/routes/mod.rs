//! Route definitions for the Farm-to-Market Marketplace

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes - batch lifecycle and bidding
        .nest("/batches", batch_routes())
        // Protected routes - the bidder's own bids and settlement
        .nest("/bids", bid_routes())
        // Protected routes - distributor inventory and retailer purchases
        .nest("/inventory", inventory_routes())
        // Protected routes - revenue ledger reads
        .nest("/revenue", revenue_routes())
        // Protected routes - profile lookups
        .nest("/profiles", profile_routes())
}

/// Batch lifecycle routes (protected)
fn batch_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_batches).post(handlers::create_batch),
        )
        .route("/mine", get(handlers::list_my_batches))
        .route("/open", get(handlers::list_open_batches))
        .route("/pending", get(handlers::list_pending_batches))
        .route("/:batch_id", get(handlers::get_batch))
        .route("/:batch_id/certify", post(handlers::certify_batch))
        .route("/:batch_id/availability", put(handlers::set_availability))
        .route(
            "/:batch_id/bids",
            get(handlers::list_bids_for_batch).post(handlers::place_bid),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Bid routes (protected)
fn bid_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_my_bids))
        .route("/:bid_id/accept", post(handlers::accept_bid))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Inventory routes (protected)
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_inventory))
        .route("/available", get(handlers::list_available_inventory))
        .route("/purchases", get(handlers::list_purchases))
        .route("/:inventory_id", get(handlers::get_inventory_item))
        .route("/:inventory_id/purchase", post(handlers::purchase))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Revenue routes (protected)
fn revenue_routes() -> Router<AppState> {
    Router::new()
        .route("/total", get(handlers::get_total_revenue))
        .route("/entries", get(handlers::get_revenue_entries))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Profile routes (protected)
fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/:user_id", get(handlers::get_profile))
        .route_layer(middleware::from_fn(auth_middleware))
}
