//! Profile models
//!
//! Profiles live outside the marketplace core; the core reads them for
//! display enrichment and for re-checking roles on protected operations.
//! Role-specific attributes are a tagged variant per role rather than a
//! flat bag of optional fields.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::UserRole;

/// Public profile summary attached to bid and inventory listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub role: UserRole,
}

/// Role-specific profile attributes, keyed by role
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ProfileDetails {
    Farmer {
        farm_location: Option<String>,
        farm_size_acres: Option<Decimal>,
        farming_experience_years: Option<i32>,
        certifications: Vec<String>,
    },
    Distributor {
        company_name: Option<String>,
        license_number: Option<String>,
        warehouse_locations: Vec<String>,
        transportation_capacity_kg: Option<Decimal>,
    },
    Retailer {
        store_name: Option<String>,
        store_address: Option<String>,
        store_type: Option<String>,
        business_license: Option<String>,
    },
    Inspector {
        certification_body: Option<String>,
        specializations: Vec<String>,
        active_since: Option<NaiveDate>,
    },
}

impl ProfileDetails {
    pub fn role(&self) -> UserRole {
        match self {
            ProfileDetails::Farmer { .. } => UserRole::Farmer,
            ProfileDetails::Distributor { .. } => UserRole::Distributor,
            ProfileDetails::Retailer { .. } => UserRole::Retailer,
            ProfileDetails::Inspector { .. } => UserRole::Inspector,
        }
    }

    /// Company name shown in bid listings, where one applies to the role.
    pub fn company_name(&self) -> Option<&str> {
        match self {
            ProfileDetails::Distributor { company_name, .. } => company_name.as_deref(),
            ProfileDetails::Retailer { store_name, .. } => store_name.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_tag_matches_role() {
        let d = ProfileDetails::Inspector {
            certification_body: Some("AGMARK".to_string()),
            specializations: vec!["grains".to_string()],
            active_since: None,
        };
        assert_eq!(d.role(), UserRole::Inspector);

        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["role"], "inspector");
    }

    #[test]
    fn company_name_only_for_trading_roles() {
        let d = ProfileDetails::Farmer {
            farm_location: None,
            farm_size_acres: None,
            farming_experience_years: None,
            certifications: vec![],
        };
        assert!(d.company_name().is_none());
    }
}
