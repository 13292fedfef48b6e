//! Inventory allocation rules
//!
//! A distributor's inventory lot is opened by bid settlement with the full
//! batch quantity and is only ever drawn down by retailer purchases. The
//! quantity available never goes negative.

use rust_decimal::Decimal;
use thiserror::Error;

/// Why a stock draw was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("Quantity must be positive")]
    NonPositiveQuantity,
    #[error("Requested quantity exceeds quantity available")]
    InsufficientStock,
}

/// Draw `requested` from a lot holding `available`, returning the new
/// balance. The caller applies this inside the same transaction that
/// re-read `available`.
pub fn draw_stock(available: Decimal, requested: Decimal) -> Result<Decimal, AllocationError> {
    if requested <= Decimal::ZERO {
        return Err(AllocationError::NonPositiveQuantity);
    }
    if requested > available {
        return Err(AllocationError::InsufficientStock);
    }
    Ok(available - requested)
}

/// The row mutations applied atomically when a bid is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementPlan {
    /// Recorded on the batch as the final sale price (the raw bid amount).
    pub sold_price: Decimal,
    /// Opening quantity of the new inventory lot (the full batch quantity).
    pub lot_quantity: Decimal,
    /// What the distributor paid for the lot (the raw bid amount).
    pub purchase_price: Decimal,
    /// Seller-set resale price per kg for the new lot.
    pub selling_price_per_kg: Decimal,
}

/// Compute the settlement for a winning bid. The bid amount prices the
/// whole lot; the per-kg resale price is supplied separately by the
/// seller and the two are kept distinct.
pub fn settlement_plan(
    batch_quantity: Decimal,
    bid_amount: Decimal,
    selling_price_per_kg: Decimal,
) -> Result<SettlementPlan, &'static str> {
    if batch_quantity <= Decimal::ZERO {
        return Err("Batch quantity must be positive");
    }
    if bid_amount <= Decimal::ZERO {
        return Err("Bid amount must be positive");
    }
    if selling_price_per_kg <= Decimal::ZERO {
        return Err("Selling price per kg must be positive");
    }
    Ok(SettlementPlan {
        sold_price: bid_amount,
        lot_quantity: batch_quantity,
        purchase_price: bid_amount,
        selling_price_per_kg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn draw_reduces_balance() {
        assert_eq!(draw_stock(dec("100"), dec("60")).unwrap(), dec("40"));
    }

    #[test]
    fn draw_to_zero_is_allowed() {
        assert_eq!(draw_stock(dec("60"), dec("60")).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn overdraw_is_refused() {
        assert_eq!(
            draw_stock(dec("40"), dec("60")),
            Err(AllocationError::InsufficientStock)
        );
    }

    #[test]
    fn non_positive_draw_is_refused() {
        assert_eq!(
            draw_stock(dec("100"), Decimal::ZERO),
            Err(AllocationError::NonPositiveQuantity)
        );
        assert_eq!(
            draw_stock(dec("100"), dec("-5")),
            Err(AllocationError::NonPositiveQuantity)
        );
    }

    #[test]
    fn settlement_takes_full_batch_quantity() {
        let plan = settlement_plan(dec("1000"), dec("7000"), dec("12.50")).unwrap();
        assert_eq!(plan.lot_quantity, dec("1000"));
        assert_eq!(plan.sold_price, dec("7000"));
        assert_eq!(plan.purchase_price, dec("7000"));
        assert_eq!(plan.selling_price_per_kg, dec("12.50"));
    }

    #[test]
    fn settlement_rejects_non_positive_prices() {
        assert!(settlement_plan(dec("1000"), Decimal::ZERO, dec("12")).is_err());
        assert!(settlement_plan(dec("1000"), dec("7000"), Decimal::ZERO).is_err());
        assert!(settlement_plan(Decimal::ZERO, dec("7000"), dec("12")).is_err());
    }
}
