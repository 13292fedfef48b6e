//! Inventory allocation tests
//!
//! Tests for purchase settlement including:
//! - Stock conservation: available = original - sum of purchases
//! - Overselling is impossible, the lot never goes negative
//! - Purchase cost arithmetic

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{draw_stock, purchase_cost, AllocationError};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Apply a sequence of purchase requests against one lot the way the
/// purchase transaction does: re-read the balance, draw, record. Returns
/// the final balance and the quantities that were actually sold.
fn run_purchases(original: Decimal, requests: &[Decimal]) -> (Decimal, Vec<Decimal>) {
    let mut balance = original;
    let mut sold = Vec::new();
    for &request in requests {
        if let Ok(next) = draw_stock(balance, request) {
            balance = next;
            sold.push(request);
        }
    }
    (balance, sold)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// The 100 kg lot at 20/kg with two 60 kg requests: the first draw
    /// succeeds, the second finds only 40 kg left and fails.
    #[test]
    fn test_two_purchases_exceeding_stock() {
        let balance = draw_stock(dec("100"), dec("60")).unwrap();
        assert_eq!(balance, dec("40"));

        assert_eq!(
            draw_stock(balance, dec("60")),
            Err(AllocationError::InsufficientStock)
        );

        // The successful purchase cost 60 x 20
        assert_eq!(purchase_cost(dec("60"), dec("20")), dec("1200"));
    }

    /// Draining a lot exactly to zero is a valid purchase
    #[test]
    fn test_full_drain() {
        assert_eq!(draw_stock(dec("75.5"), dec("75.5")).unwrap(), Decimal::ZERO);
    }

    /// Zero and negative requests are rejected as invalid input
    #[test]
    fn test_non_positive_requests() {
        assert_eq!(
            draw_stock(dec("100"), Decimal::ZERO),
            Err(AllocationError::NonPositiveQuantity)
        );
        assert_eq!(
            draw_stock(dec("100"), dec("-10")),
            Err(AllocationError::NonPositiveQuantity)
        );
    }

    /// An empty lot refuses every request
    #[test]
    fn test_empty_lot() {
        assert_eq!(
            draw_stock(Decimal::ZERO, dec("0.001")),
            Err(AllocationError::InsufficientStock)
        );
    }

    /// Total cost keeps decimal precision
    #[test]
    fn test_purchase_cost() {
        assert_eq!(purchase_cost(dec("12.5"), dec("19.90")), dec("248.750"));
        assert_eq!(purchase_cost(dec("1"), dec("20")), dec("20"));
    }

    /// A sequence of mixed requests sells only what fits
    #[test]
    fn test_purchase_sequence() {
        let (balance, sold) = run_purchases(
            dec("100"),
            &[dec("30"), dec("50"), dec("40"), dec("20"), dec("5")],
        );
        // 30 and 50 succeed (20 left), 40 fails, 20 drains it, 5 fails
        assert_eq!(sold, vec![dec("30"), dec("50"), dec("20")]);
        assert_eq!(balance, Decimal::ZERO);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn quantity_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..1_000_000).prop_map(|n| Decimal::new(n, 3))
    }

    proptest! {
        /// Conservation: the final balance is always the original minus
        /// exactly the quantities that sold, and never negative
        #[test]
        fn prop_stock_conservation(
            original in quantity_strategy(),
            requests in prop::collection::vec(quantity_strategy(), 0..30)
        ) {
            let (balance, sold) = run_purchases(original, &requests);
            let total_sold: Decimal = sold.iter().sum();

            prop_assert_eq!(balance, original - total_sold);
            prop_assert!(balance >= Decimal::ZERO);
            prop_assert!(total_sold <= original);
        }

        /// A single draw either fails or leaves a non-negative balance
        #[test]
        fn prop_draw_never_negative(
            available in quantity_strategy(),
            requested in quantity_strategy()
        ) {
            match draw_stock(available, requested) {
                Ok(balance) => {
                    prop_assert!(balance >= Decimal::ZERO);
                    prop_assert_eq!(balance, available - requested);
                }
                Err(AllocationError::InsufficientStock) => {
                    prop_assert!(requested > available);
                }
                Err(AllocationError::NonPositiveQuantity) => {
                    prop_assert!(requested <= Decimal::ZERO);
                }
            }
        }

        /// Cost is linear in quantity
        #[test]
        fn prop_cost_linear(
            q1 in quantity_strategy(),
            q2 in quantity_strategy(),
            price in quantity_strategy()
        ) {
            let combined = purchase_cost(q1 + q2, price);
            let split = purchase_cost(q1, price) + purchase_cost(q2, price);
            prop_assert_eq!(combined, split);
        }
    }
}
