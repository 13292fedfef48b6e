//! Batch lifecycle tests
//!
//! Tests for the batch state machine including:
//! - Grade set iff verified
//! - One-shot inspection out of pending
//! - Bidding eligibility

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{
    bidding_eligibility, validate_inspection, validate_quantity, validate_required_text,
    BatchEligibility, InspectionDecision, QualityGrade, VerificationStatus,
};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Creation inputs: quantity must be positive, text fields required
    #[test]
    fn test_create_batch_validation() {
        assert!(validate_quantity(dec("1000")).is_ok());
        assert!(validate_quantity(dec("0")).is_err());
        assert!(validate_quantity(dec("-250")).is_err());
        assert!(validate_required_text("Wheat").is_ok());
        assert!(validate_required_text("  ").is_err());
    }

    /// Inspection is allowed exactly once, out of pending
    #[test]
    fn test_inspection_one_shot() {
        assert!(VerificationStatus::Pending.can_inspect());
        assert!(!VerificationStatus::Verified.can_inspect());
        assert!(!VerificationStatus::Rejected.can_inspect());
    }

    /// A verified batch carries a grade; a rejected batch never does
    #[test]
    fn test_grade_iff_verified() {
        assert!(validate_inspection(InspectionDecision::Verified, Some(QualityGrade::A)).is_ok());
        assert!(validate_inspection(InspectionDecision::Verified, Some(QualityGrade::C)).is_ok());
        assert!(validate_inspection(InspectionDecision::Verified, None).is_err());
        assert!(validate_inspection(InspectionDecision::Rejected, None).is_ok());
        assert!(validate_inspection(InspectionDecision::Rejected, Some(QualityGrade::A)).is_err());
    }

    /// A batch still pending takes no bids
    #[test]
    fn test_pending_batch_not_biddable() {
        assert_eq!(
            bidding_eligibility(VerificationStatus::Pending, true, false),
            BatchEligibility::NotVerified
        );
    }

    /// A rejected batch takes no bids even if listed
    #[test]
    fn test_rejected_batch_not_biddable() {
        assert_eq!(
            bidding_eligibility(VerificationStatus::Rejected, true, false),
            BatchEligibility::NotVerified
        );
    }

    /// Delisting closes bidding without touching verification
    #[test]
    fn test_delisted_batch_not_biddable() {
        assert_eq!(
            bidding_eligibility(VerificationStatus::Verified, false, false),
            BatchEligibility::NotListed
        );
    }

    /// A sold batch reports the sale, not the listing state
    #[test]
    fn test_sold_batch_reports_sold() {
        assert_eq!(
            bidding_eligibility(VerificationStatus::Verified, false, true),
            BatchEligibility::AlreadySold
        );
        assert_eq!(
            bidding_eligibility(VerificationStatus::Verified, true, true),
            BatchEligibility::AlreadySold
        );
    }

    /// Status strings round-trip through the store representation
    #[test]
    fn test_status_round_trip() {
        for s in ["pending", "verified", "rejected"] {
            assert_eq!(VerificationStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(VerificationStatus::parse("sold").is_none());
        for g in ["A", "B", "C"] {
            assert_eq!(QualityGrade::parse(g).unwrap().as_str(), g);
        }
        assert!(QualityGrade::parse("D").is_none());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn status_strategy() -> impl Strategy<Value = VerificationStatus> {
        prop_oneof![
            Just(VerificationStatus::Pending),
            Just(VerificationStatus::Verified),
            Just(VerificationStatus::Rejected),
        ]
    }

    proptest! {
        /// Eligible exactly when verified, listed, and unsold
        #[test]
        fn prop_eligibility(status in status_strategy(), listed in any::<bool>(), sold in any::<bool>()) {
            let e = bidding_eligibility(status, listed, sold);
            let eligible = status == VerificationStatus::Verified && listed && !sold;
            prop_assert_eq!(e == BatchEligibility::Eligible, eligible);
        }

        /// A sold batch is never eligible, whatever else holds
        #[test]
        fn prop_sold_is_terminal(status in status_strategy(), listed in any::<bool>()) {
            let e = bidding_eligibility(status, listed, true);
            prop_assert_eq!(e, BatchEligibility::AlreadySold);
        }

        /// The grade-iff-verified rule holds for every decision/grade pairing
        #[test]
        fn prop_grade_iff_verified(verified in any::<bool>(), has_grade in any::<bool>()) {
            let decision = if verified {
                InspectionDecision::Verified
            } else {
                InspectionDecision::Rejected
            };
            let grade = if has_grade { Some(QualityGrade::B) } else { None };
            prop_assert_eq!(validate_inspection(decision, grade).is_ok(), verified == has_grade);
        }
    }
}
