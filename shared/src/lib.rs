//! Shared types and models for the Farm-to-Market Marketplace
//!
//! This crate contains the domain model shared between the backend services
//! and their tests: lifecycle enums, input types, and the pure marketplace
//! arithmetic (settlement and stock allocation rules).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
