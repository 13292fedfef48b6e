//! Business logic services for the Farm-to-Market Marketplace
//!
//! All mutation of batches, bids, inventory, purchases, and revenue
//! funnels through these services; there is no other write path into the
//! store.

pub mod batch;
pub mod bid;
pub mod inventory;
pub mod profile;
pub mod revenue;
pub mod settlement;

pub use batch::BatchService;
pub use bid::BidService;
pub use inventory::InventoryService;
pub use profile::ProfileService;
pub use revenue::RevenueService;
pub use settlement::SettlementService;
