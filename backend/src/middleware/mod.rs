//! Middleware for the Farm-to-Market Marketplace

pub mod auth;

pub use auth::{auth_middleware, AuthUser, CurrentUser};
