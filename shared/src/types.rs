//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Marketplace roles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Farmer,
    Distributor,
    Retailer,
    Inspector,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Farmer => "farmer",
            UserRole::Distributor => "distributor",
            UserRole::Retailer => "retailer",
            UserRole::Inspector => "inspector",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "farmer" => Some(UserRole::Farmer),
            "distributor" => Some(UserRole::Distributor),
            "retailer" => Some(UserRole::Retailer),
            "inspector" => Some(UserRole::Inspector),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
