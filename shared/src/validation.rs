//! Validation utilities for the Farm-to-Market Marketplace

use rust_decimal::Decimal;

/// Validate that a quantity is strictly positive
pub fn validate_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Validate that a monetary amount is strictly positive
pub fn validate_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Amount must be positive");
    }
    Ok(())
}

/// Validate a required free-text field (crop name, farm location)
pub fn validate_required_text(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Field must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn positive_quantity_passes() {
        assert!(validate_quantity(Decimal::from_str("0.5").unwrap()).is_ok());
    }

    #[test]
    fn zero_and_negative_quantity_fail() {
        assert!(validate_quantity(Decimal::ZERO).is_err());
        assert!(validate_quantity(Decimal::from_str("-1").unwrap()).is_err());
    }

    #[test]
    fn zero_amount_fails() {
        assert!(validate_amount(Decimal::ZERO).is_err());
        assert!(validate_amount(Decimal::from(5000)).is_ok());
    }

    #[test]
    fn blank_text_fails() {
        assert!(validate_required_text("").is_err());
        assert!(validate_required_text("   ").is_err());
        assert!(validate_required_text("Wheat").is_ok());
    }
}
