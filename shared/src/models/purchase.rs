//! Retailer purchase models

use rust_decimal::Decimal;
use serde::Deserialize;

/// Input for purchasing from a distributor's inventory lot
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseInput {
    pub quantity_purchased: Decimal,
}

/// Total cost of a purchase at the lot's per-kg price. The unit price is
/// snapshotted onto the purchase record and never re-read from the lot.
pub fn purchase_cost(quantity: Decimal, price_per_kg: Decimal) -> Decimal {
    quantity * price_per_kg
}
