//! Bid models
//!
//! A bid is a distributor's offer for a whole batch. Bids start `active`;
//! settlement moves exactly one bid on a batch to `accepted` and every
//! other active bid to `rejected`. Both outcomes are terminal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status of a bid
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    Active,
    Accepted,
    Rejected,
}

impl BidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BidStatus::Active => "active",
            BidStatus::Accepted => "accepted",
            BidStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(BidStatus::Active),
            "accepted" => Some(BidStatus::Accepted),
            "rejected" => Some(BidStatus::Rejected),
            _ => None,
        }
    }

    /// Only active bids can still be accepted or rejected.
    pub fn is_settled(&self) -> bool {
        !matches!(self, BidStatus::Active)
    }
}

/// Input for placing a bid on a batch
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceBidInput {
    pub bid_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_and_rejected_are_settled() {
        assert!(!BidStatus::Active.is_settled());
        assert!(BidStatus::Accepted.is_settled());
        assert!(BidStatus::Rejected.is_settled());
    }
}
