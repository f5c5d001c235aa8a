use std::fmt;
use std::str::FromStr;

use serde::{ Deserialize, Serialize };

use crate::error::AppError;

/// Canonical electricity plan shape used throughout search, filtering and
/// alerting. Constructed fresh on every search response; identified by the
/// (company_id, plan_name) pair since upstream guarantees no stable key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub company_id: String,
    pub company_name: String,
    pub company_logo: Option<String>,

    pub plan_name: String,
    pub plan_type_name: String,
    pub term_value: Option<i32>,

    // Tier prices in dollars per kWh, all produced by the same rate parser.
    pub price_kwh500: f64,
    pub price_kwh1000: f64,
    pub price_kwh2000: f64,
    pub base_charge: Option<f64>,

    pub minimum_usage: bool,
    pub new_customer: bool,
    pub prepaid: bool,
    pub timeofuse: bool,

    /// Renewable content as a 0-100 percentage.
    pub renewable: i32,

    pub jdp_rating: Option<f64>,
    pub jdp_rating_year: Option<String>,

    pub plan_details: Option<String>,
    pub pricing_details: Option<String>,
    pub promotions: Option<String>,

    pub fact_sheet: Option<String>,
    pub terms_of_service: Option<String>,
    pub yrac_url: Option<String>,

    pub enroll_phone: Option<String>,
    pub go_to_plan: Option<String>,
}

impl Plan {
    /// Per-kWh price quoted at the given monthly usage tier.
    pub fn tier_price(&self, tier: UsageTier) -> f64 {
        match tier {
            UsageTier::Kwh500 => self.price_kwh500,
            UsageTier::Kwh1000 => self.price_kwh1000,
            UsageTier::Kwh2000 => self.price_kwh2000,
        }
    }
}

/// The three monthly usage levels plans are quoted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsageTier {
    Kwh500,
    Kwh1000,
    Kwh2000,
}

impl UsageTier {
    /// Canonical string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageTier::Kwh500 => "500",
            UsageTier::Kwh1000 => "1000",
            UsageTier::Kwh2000 => "2000",
        }
    }
}

impl fmt::Display for UsageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kWh", self.as_str())
    }
}

impl FromStr for UsageTier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "500" => Ok(UsageTier::Kwh500),
            "1000" => Ok(UsageTier::Kwh1000),
            "2000" => Ok(UsageTier::Kwh2000),
            other => Err(AppError::InvalidInput(format!("Unknown usage tier: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_tier_round_trip() {
        for tier in [UsageTier::Kwh500, UsageTier::Kwh1000, UsageTier::Kwh2000] {
            assert_eq!(tier.as_str().parse::<UsageTier>().unwrap(), tier);
        }
        assert!("750".parse::<UsageTier>().is_err());
    }
}
