//! HTTP handlers for the Farm-to-Market Marketplace

pub mod batch;
pub mod bid;
pub mod health;
pub mod inventory;
pub mod profile;
pub mod revenue;

pub use batch::*;
pub use bid::*;
pub use health::*;
pub use inventory::*;
pub use profile::*;
pub use revenue::*;
