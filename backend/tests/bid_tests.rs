//! Bidding tests
//!
//! Tests for bid validity and listing order:
//! - Amounts must be positive
//! - Active bids list best offer first, ties broken by placement time
//! - Accepted and rejected bids are terminal

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{validate_amount, BidStatus};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Sort key used by the bid listing: highest amount first, earliest
/// placement wins ties. Mirrors `ORDER BY bid_amount DESC, created_at ASC`.
fn sort_bids(bids: &mut [(Decimal, i64)]) {
    bids.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Bid amounts must be strictly positive
    #[test]
    fn test_bid_amount_validation() {
        assert!(validate_amount(dec("5000")).is_ok());
        assert!(validate_amount(dec("0.01")).is_ok());
        assert!(validate_amount(Decimal::ZERO).is_err());
        assert!(validate_amount(dec("-100")).is_err());
    }

    /// Highest offer listed first
    #[test]
    fn test_listing_order_by_amount() {
        let mut bids = vec![(dec("5000"), 1), (dec("7000"), 2), (dec("6500"), 3)];
        sort_bids(&mut bids);
        assert_eq!(bids[0].0, dec("7000"));
        assert_eq!(bids[1].0, dec("6500"));
        assert_eq!(bids[2].0, dec("5000"));
    }

    /// Equal offers rank by placement time, earliest first
    #[test]
    fn test_listing_order_tie_break() {
        let mut bids = vec![(dec("7000"), 30), (dec("7000"), 10), (dec("7000"), 20)];
        sort_bids(&mut bids);
        assert_eq!(bids.iter().map(|b| b.1).collect::<Vec<_>>(), vec![10, 20, 30]);
    }

    /// Only active bids can still be settled
    #[test]
    fn test_terminal_statuses() {
        assert!(!BidStatus::Active.is_settled());
        assert!(BidStatus::Accepted.is_settled());
        assert!(BidStatus::Rejected.is_settled());
    }

    /// Status strings round-trip through the store representation
    #[test]
    fn test_status_round_trip() {
        for s in ["active", "accepted", "rejected"] {
            assert_eq!(BidStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(BidStatus::parse("withdrawn").is_none());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..10_000_000).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        /// After sorting, amounts never increase down the list
        #[test]
        fn prop_listing_is_descending(
            amounts in prop::collection::vec(amount_strategy(), 1..20)
        ) {
            let mut bids: Vec<(Decimal, i64)> = amounts
                .into_iter()
                .enumerate()
                .map(|(i, a)| (a, i as i64))
                .collect();
            sort_bids(&mut bids);

            for pair in bids.windows(2) {
                prop_assert!(pair[0].0 >= pair[1].0);
                if pair[0].0 == pair[1].0 {
                    prop_assert!(pair[0].1 < pair[1].1);
                }
            }
        }

        /// Every positive amount is a valid bid, zero and below never are
        #[test]
        fn prop_amount_validity(n in -1_000_000i64..1_000_000) {
            let amount = Decimal::new(n, 2);
            prop_assert_eq!(validate_amount(amount).is_ok(), amount > Decimal::ZERO);
        }
    }
}
