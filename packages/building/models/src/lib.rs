#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical building record and borough taxonomy for the rent-stabilization
//! dataset.
//!
//! These types define the wire format consumed by the web frontend: compact
//! single/double-letter field names keep the per-borough JSON files small
//! enough to lazy-load in the browser.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One of the five NYC boroughs.
///
/// Variants are declared in borough-name order so the derived [`Ord`]
/// matches a string comparison of the full names, which is the ordering
/// the output files are sorted by.
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
pub enum Borough {
    /// BX
    Bronx,
    /// BK
    Brooklyn,
    /// MN
    Manhattan,
    /// QN
    Queens,
    /// SI
    #[serde(rename = "Staten Island")]
    #[strum(serialize = "Staten Island")]
    StatenIsland,
}

impl Borough {
    /// All five boroughs, in output order.
    pub const ALL: [Self; 5] = [
        Self::Bronx,
        Self::Brooklyn,
        Self::Manhattan,
        Self::Queens,
        Self::StatenIsland,
    ];

    /// Resolves a two-letter borough code from the source extract
    /// (`MN`, `BX`, `BK`, `QN`, `SI`). Returns `None` for anything else.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "MN" => Some(Self::Manhattan),
            "BX" => Some(Self::Bronx),
            "BK" => Some(Self::Brooklyn),
            "QN" => Some(Self::Queens),
            "SI" => Some(Self::StatenIsland),
            _ => None,
        }
    }

    /// Output filename stem: the lowercased borough name with spaces
    /// replaced by hyphens (e.g. `staten-island`).
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Bronx => "bronx",
            Self::Brooklyn => "brooklyn",
            Self::Manhattan => "manhattan",
            Self::Queens => "queens",
            Self::StatenIsland => "staten-island",
        }
    }
}

/// A normalized rent-stabilized building, as written to the per-borough
/// JSON files.
///
/// Field names are the wire format. Optional fields serialize as `null`
/// (never omitted) so every record carries the same keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingRecord {
    /// Tax-lot identifier (`ucbbl`), or the 1-based data row index as a
    /// string when the source field is blank.
    pub i: String,
    /// Borough.
    pub b: Borough,
    /// Street address.
    pub a: String,
    /// Owner name, empty string when absent.
    pub o: String,
    /// 5-digit zip code, empty string when the source value failed
    /// validation.
    pub z: String,
    /// Latitude, rounded to 4 decimal places (~11 m).
    pub la: Option<f64>,
    /// Longitude, rounded to 4 decimal places.
    pub lo: Option<f64>,
    /// Year built, only when within `[1800, 2025]`.
    pub yb: Option<u32>,
    /// Number of floors.
    pub fl: Option<u32>,
    /// Residential unit count.
    pub ur: Option<u32>,
    /// Total unit count.
    pub ut: Option<u32>,
    /// Stabilized unit count from the most recent year with a nonzero
    /// value, preferring the 2018-2023 supplemental data over the legacy
    /// 2007-2017 columns.
    pub su: Option<u32>,
    /// Data year `su` was taken from.
    pub dy: Option<String>,
    /// Most recent abatement code (2017 back to 2014), empty string when
    /// none.
    pub ab: String,
}

/// Most recent nonzero stabilized-unit count for one building in the
/// supplemental 2018-2023 extract.
///
/// Both fields are `None` when the building appears in the extract but has
/// no positive count in any year — distinct from the building being absent
/// from the extract entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct V2Entry {
    /// Unit count from the latest qualifying year.
    pub latest_units: Option<u32>,
    /// The qualifying year, as a string (`"2018"`..`"2023"`).
    pub latest_year: Option<String>,
}

/// Building and unit totals for one borough.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoroughTotals {
    /// Number of buildings.
    pub buildings: u64,
    /// Total stabilized units (records with no count contribute 0).
    pub units: u64,
}

/// Building and unit totals for one zip code.
///
/// The borough tag is the borough of the *last* record seen for the zip in
/// sort order. A zip spanning multiple boroughs in the source data keeps
/// only the last one — inherited simplification, preserved for output
/// compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipcodeStats {
    /// The 5-digit zip code.
    pub zipcode: String,
    /// Number of buildings.
    pub buildings: u64,
    /// Total stabilized units.
    pub units: u64,
    /// Borough of the last record seen for this zip.
    pub borough: Borough,
}

/// Aggregate statistics over the full dataset, written pretty-printed as
/// `stats.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStats {
    /// Total number of buildings across all boroughs.
    pub total_buildings: u64,
    /// Total stabilized units across all boroughs.
    pub total_stabilized_units: u64,
    /// Per-borough totals, keyed by borough name. Boroughs with no records
    /// are absent, not zero-filled.
    pub by_borough: BTreeMap<String, BoroughTotals>,
    /// Top 25 zip codes by stabilized units, descending.
    pub top_zipcodes: Vec<ZipcodeStats>,
    /// Construction-decade histogram, keyed by `floor(year / 10) * 10`.
    /// Only records with a valid year built are counted.
    pub year_built_distribution: BTreeMap<u32, u64>,
}
