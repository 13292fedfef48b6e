//! Batch lifecycle models
//!
//! A batch is a single harvested lot. It moves through exactly two
//! transitions: an inspector settles `pending` into `verified` or
//! `rejected`, and bid settlement moves a verified batch to sold.
//! Sold is terminal.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Verification status of a batch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(VerificationStatus::Pending),
            "verified" => Some(VerificationStatus::Verified),
            "rejected" => Some(VerificationStatus::Rejected),
            _ => None,
        }
    }

    /// Inspection is a one-shot transition out of `pending`.
    pub fn can_inspect(&self) -> bool {
        matches!(self, VerificationStatus::Pending)
    }
}

/// Quality grade issued at inspection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QualityGrade {
    A,
    B,
    C,
}

impl QualityGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityGrade::A => "A",
            QualityGrade::B => "B",
            QualityGrade::C => "C",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "A" => Some(QualityGrade::A),
            "B" => Some(QualityGrade::B),
            "C" => Some(QualityGrade::C),
            _ => None,
        }
    }
}

/// Inspector's verdict on a pending batch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InspectionDecision {
    Verified,
    Rejected,
}

/// Input for creating a batch
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBatchInput {
    pub crop_name: String,
    pub quantity: Decimal,
    pub harvest_date: NaiveDate,
    pub farm_location: String,
}

/// Input for certifying a batch
#[derive(Debug, Clone, Deserialize)]
pub struct CertifyBatchInput {
    pub decision: InspectionDecision,
    pub grade: Option<QualityGrade>,
    pub notes: Option<String>,
}

/// Validate the grade/decision pairing: a grade is set iff the batch
/// is verified.
pub fn validate_inspection(
    decision: InspectionDecision,
    grade: Option<QualityGrade>,
) -> Result<(), &'static str> {
    match (decision, grade) {
        (InspectionDecision::Verified, Some(_)) => Ok(()),
        (InspectionDecision::Verified, None) => Err("A quality grade is required to verify a batch"),
        (InspectionDecision::Rejected, None) => Ok(()),
        (InspectionDecision::Rejected, Some(_)) => {
            Err("A rejected batch cannot carry a quality grade")
        }
    }
}

/// Why a batch is not open for bidding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchEligibility {
    Eligible,
    NotVerified,
    NotListed,
    AlreadySold,
}

/// Check whether a batch can take bids. Sold wins over the other
/// conditions so callers can distinguish a lost race from a batch
/// that was never biddable.
pub fn bidding_eligibility(
    status: VerificationStatus,
    is_available_for_sale: bool,
    is_sold: bool,
) -> BatchEligibility {
    if is_sold {
        BatchEligibility::AlreadySold
    } else if status != VerificationStatus::Verified {
        BatchEligibility::NotVerified
    } else if !is_available_for_sale {
        BatchEligibility::NotListed
    } else {
        BatchEligibility::Eligible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspection_only_from_pending() {
        assert!(VerificationStatus::Pending.can_inspect());
        assert!(!VerificationStatus::Verified.can_inspect());
        assert!(!VerificationStatus::Rejected.can_inspect());
    }

    #[test]
    fn grade_required_iff_verified() {
        assert!(validate_inspection(InspectionDecision::Verified, Some(QualityGrade::A)).is_ok());
        assert!(validate_inspection(InspectionDecision::Verified, None).is_err());
        assert!(validate_inspection(InspectionDecision::Rejected, None).is_ok());
        assert!(validate_inspection(InspectionDecision::Rejected, Some(QualityGrade::B)).is_err());
    }

    #[test]
    fn sold_batch_is_never_eligible() {
        let e = bidding_eligibility(VerificationStatus::Verified, true, true);
        assert_eq!(e, BatchEligibility::AlreadySold);
    }

    #[test]
    fn pending_batch_is_not_eligible() {
        let e = bidding_eligibility(VerificationStatus::Pending, true, false);
        assert_eq!(e, BatchEligibility::NotVerified);
    }

    #[test]
    fn unlisted_batch_is_not_eligible() {
        let e = bidding_eligibility(VerificationStatus::Verified, false, false);
        assert_eq!(e, BatchEligibility::NotListed);
    }

    #[test]
    fn verified_listed_unsold_is_eligible() {
        let e = bidding_eligibility(VerificationStatus::Verified, true, false);
        assert_eq!(e, BatchEligibility::Eligible);
    }

    #[test]
    fn status_round_trips() {
        for s in ["pending", "verified", "rejected"] {
            assert_eq!(VerificationStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(VerificationStatus::parse("sold").is_none());
    }
}
