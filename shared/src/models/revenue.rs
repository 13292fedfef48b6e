//! Revenue ledger models
//!
//! Revenue entries are append-only. A user's total revenue is always the
//! sum of their entries; nothing updates or deletes a row.

use serde::{Deserialize, Serialize};

/// Sale event that produced a revenue entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RevenueSource {
    /// A farmer's batch sold to a distributor through bid settlement.
    BatchSale,
    /// A distributor's lot sold piecemeal to a retailer.
    RetailerSale,
}

impl RevenueSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevenueSource::BatchSale => "batch_sale",
            RevenueSource::RetailerSale => "retailer_sale",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "batch_sale" => Some(RevenueSource::BatchSale),
            "retailer_sale" => Some(RevenueSource::RetailerSale),
            _ => None,
        }
    }
}
