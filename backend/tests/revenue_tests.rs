//! Revenue ledger tests
//!
//! Tests for the append-only revenue model:
//! - A user's total is the exact sum of their entries
//! - Settlement and purchase credits land on the right beneficiary

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::RevenueSource;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// An append-only ledger keyed by user, mirroring `user_revenue`
#[derive(Default)]
struct Ledger {
    entries: Vec<(u32, Decimal, RevenueSource)>,
}

impl Ledger {
    fn credit(&mut self, user: u32, amount: Decimal, source: RevenueSource) {
        self.entries.push((user, amount, source));
    }

    /// SUM(amount) WHERE user_id = user
    fn total(&self, user: u32) -> Decimal {
        self.entries
            .iter()
            .filter(|(u, _, _)| *u == user)
            .map(|(_, a, _)| *a)
            .sum()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A batch sale credits the farmer, a retailer sale the distributor
    #[test]
    fn test_credits_land_on_beneficiary() {
        let mut ledger = Ledger::default();
        ledger.credit(1, dec("7000"), RevenueSource::BatchSale);
        ledger.credit(2, dec("1200"), RevenueSource::RetailerSale);

        assert_eq!(ledger.total(1), dec("7000"));
        assert_eq!(ledger.total(2), dec("1200"));
        assert_eq!(ledger.total(3), Decimal::ZERO);
    }

    /// Totals accumulate across both sources
    #[test]
    fn test_total_accumulates() {
        let mut ledger = Ledger::default();
        ledger.credit(2, dec("7000"), RevenueSource::BatchSale);
        ledger.credit(2, dec("1200"), RevenueSource::RetailerSale);
        ledger.credit(2, dec("800"), RevenueSource::RetailerSale);

        assert_eq!(ledger.total(2), dec("9000"));
    }

    /// Source tags round-trip through the store representation
    #[test]
    fn test_source_round_trip() {
        for s in ["batch_sale", "retailer_sale"] {
            assert_eq!(RevenueSource::parse(s).unwrap().as_str(), s);
        }
        assert!(RevenueSource::parse("refund").is_none());
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
        /// The total for each user equals the exact sum of their credits:
        /// no double counting, no omission
        #[test]
        fn prop_total_is_exact_sum(
            credits in prop::collection::vec((0u32..5, amount_strategy()), 0..50)
        ) {
            let mut ledger = Ledger::default();
            for (user, amount) in &credits {
                ledger.credit(*user, *amount, RevenueSource::BatchSale);
            }

            for user in 0u32..5 {
                let expected: Decimal = credits
                    .iter()
                    .filter(|(u, _)| *u == user)
                    .map(|(_, a)| *a)
                    .sum();
                prop_assert_eq!(ledger.total(user), expected);
            }
        }

        /// Appending a credit never changes another user's total
        #[test]
        fn prop_append_is_isolated(
            credits in prop::collection::vec((0u32..5, amount_strategy()), 1..30),
            extra in amount_strategy()
        ) {
            let mut ledger = Ledger::default();
            for (user, amount) in &credits {
                ledger.credit(*user, *amount, RevenueSource::RetailerSale);
            }

            let before = ledger.total(1);
            ledger.credit(0, extra, RevenueSource::BatchSale);
            prop_assert_eq!(ledger.total(1), before);
        }
    }
}
