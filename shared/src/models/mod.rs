//! Domain models for the Farm-to-Market Marketplace

mod batch;
mod bid;
mod inventory;
mod profile;
mod purchase;
mod revenue;

pub use batch::*;
pub use bid::*;
pub use inventory::*;
pub use profile::*;
pub use purchase::*;
pub use revenue::*;
