#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! AMI income tier taxonomy and Housing Connect lottery record types.
//!
//! The tier taxonomy follows the HUD income-limit bands used by NYC Housing
//! Connect: each lottery advertises unit counts per AMI band, and a household
//! is matched against the band its income falls into.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// An AMI (Area Median Income) band, from most to least restrictive.
///
/// `Above` is the catch-all for incomes exceeding the 165% limit.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AmiTier {
    /// ≤30% AMI
    ExtLow,
    /// 31-50% AMI
    VeryLow,
    /// 51-80% AMI
    Low,
    /// 81-120% AMI
    Moderate,
    /// 121-165% AMI
    Middle,
    /// >165% AMI
    Above,
}

impl AmiTier {
    /// All tiers, in ascending strictness order (most restrictive first).
    pub const ALL: [Self; 6] = [
        Self::ExtLow,
        Self::VeryLow,
        Self::Low,
        Self::Moderate,
        Self::Middle,
        Self::Above,
    ];

    /// Full display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ExtLow => "Extremely Low Income",
            Self::VeryLow => "Very Low Income",
            Self::Low => "Low Income",
            Self::Moderate => "Moderate Income",
            Self::Middle => "Middle Income",
            Self::Above => "Above Moderate Income",
        }
    }

    /// Short label for badges and filters.
    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::ExtLow => "≤30% AMI",
            Self::VeryLow => "31-50% AMI",
            Self::Low => "51-80% AMI",
            Self::Moderate => "81-120% AMI",
            Self::Middle => "121-165% AMI",
            Self::Above => ">165% AMI",
        }
    }

    /// Upper AMI percentage bound for the tier, or `None` for the
    /// unbounded `Above` tier.
    #[must_use]
    pub const fn max_percent(self) -> Option<u32> {
        match self {
            Self::ExtLow => Some(30),
            Self::VeryLow => Some(50),
            Self::Low => Some(80),
            Self::Moderate => Some(120),
            Self::Middle => Some(165),
            Self::Above => None,
        }
    }

    /// Display color (hex) used by the frontend.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::ExtLow => "#ef4444",
            Self::VeryLow => "#f97316",
            Self::Low => "#eab308",
            Self::Moderate => "#22c55e",
            Self::Middle => "#3b82f6",
            Self::Above => "#8b5cf6",
        }
    }

    /// The Socrata field in the Housing Connect dataset carrying this
    /// tier's applied-unit count.
    #[must_use]
    pub const fn lottery_field(self) -> &'static str {
        match self {
            Self::ExtLow => "applied_income_ami_ext_low",
            Self::VeryLow => "applied_income_ami_very_low",
            Self::Low => "applied_income_ami_low",
            Self::Moderate => "applied_income_ami_moderate",
            Self::Middle => "applied_income_ami_middle",
            Self::Above => "applied_income_ami_above",
        }
    }
}

/// A Housing Connect lottery record from the Socrata open-data API.
///
/// Socrata serializes every field as a string and omits nulls, so every
/// field is an `Option<String>` and numeric fields are parsed on use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HousingConnectLottery {
    pub lottery_id: Option<String>,
    pub lottery_name: Option<String>,
    pub lottery_status: Option<String>,
    pub development_type: Option<String>,
    pub lottery_start_date: Option<String>,
    pub lottery_end_date: Option<String>,
    pub unit_count: Option<String>,
    pub unit_distribution_studio: Option<String>,
    pub unit_distribution_1bed: Option<String>,
    pub unit_distribution_2bed: Option<String>,
    pub unit_distribution_3bed: Option<String>,
    pub unit_distribution_4bed: Option<String>,
    pub borough: Option<String>,
    pub postcode: Option<String>,
    pub applied_income_ami_ext_low: Option<String>,
    pub applied_income_ami_very_low: Option<String>,
    pub applied_income_ami_low: Option<String>,
    pub applied_income_ami_moderate: Option<String>,
    pub applied_income_ami_middle: Option<String>,
    pub applied_income_ami_above: Option<String>,
    pub lottery_community_board_percent: Option<String>,
    pub lottery_nycha_percent: Option<String>,
    pub lottery_municipal_employee_percent: Option<String>,
    pub lottery_mobility_percent: Option<String>,
    pub lottery_vision_hearing_percent: Option<String>,
    pub lottery_62_percent: Option<String>,
}

impl HousingConnectLottery {
    /// Returns this tier's applied-unit count for the lottery, parsing the
    /// Socrata string field. Missing or unparseable values count as 0.
    #[must_use]
    pub fn applied_units(&self, tier: AmiTier) -> u32 {
        let field = match tier {
            AmiTier::ExtLow => &self.applied_income_ami_ext_low,
            AmiTier::VeryLow => &self.applied_income_ami_very_low,
            AmiTier::Low => &self.applied_income_ami_low,
            AmiTier::Moderate => &self.applied_income_ami_moderate,
            AmiTier::Middle => &self.applied_income_ami_middle,
            AmiTier::Above => &self.applied_income_ami_above,
        };
        field
            .as_deref()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }
}
