//! Display and eligibility helpers over Housing Connect lottery records.

use chrono::{DateTime, NaiveDateTime, Utc};
use stabmap_lottery_models::{AmiTier, HousingConnectLottery};

/// A nonzero per-tier applied-unit count for a lottery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierCount {
    /// The AMI tier.
    pub tier: AmiTier,
    /// Units applied at this tier.
    pub count: u32,
}

/// A nonzero lottery set-aside preference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preference {
    /// Human-readable preference label.
    pub label: &'static str,
    /// Percentage of units set aside.
    pub percent: f64,
}

/// Returns whether the lottery status contains "active" (case-insensitive).
#[must_use]
pub fn is_active(lottery: &HousingConnectLottery) -> bool {
    lottery
        .lottery_status
        .as_deref()
        .is_some_and(|s| s.to_lowercase().contains("active"))
}

/// Parses a Socrata datetime string (ISO 8601 with optional fractional
/// seconds).
#[must_use]
pub fn parse_socrata_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    None
}

/// Formats a Socrata datetime for display (e.g. `Jan 15, 2024`).
/// Returns an em dash when the value is missing or unparseable.
#[must_use]
pub fn format_date(iso: Option<&str>) -> String {
    iso.and_then(parse_socrata_date)
        .map_or_else(|| "—".to_string(), |d| d.format("%b %-d, %Y").to_string())
}

/// Number of whole days until the lottery deadline, rounded up.
///
/// Negative when the deadline has passed; `None` when the lottery has no
/// end date (or it cannot be parsed).
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn days_remaining(end_date: Option<&str>, now: DateTime<Utc>) -> Option<i64> {
    let end = end_date.and_then(parse_socrata_date)?;
    let seconds = (end - now).num_seconds();
    Some((seconds as f64 / 86_400.0).ceil() as i64)
}

/// Builds a ` · `-joined bedroom breakdown (e.g. `5 Studio · 12 1BR`),
/// listing only unit types with a nonzero count. `None` when the lottery
/// advertises no unit distribution at all.
#[must_use]
pub fn bedroom_breakdown(lottery: &HousingConnectLottery) -> Option<String> {
    let beds = [
        ("Studio", &lottery.unit_distribution_studio),
        ("1BR", &lottery.unit_distribution_1bed),
        ("2BR", &lottery.unit_distribution_2bed),
        ("3BR", &lottery.unit_distribution_3bed),
        ("4BR", &lottery.unit_distribution_4bed),
    ];

    let parts: Vec<String> = beds
        .iter()
        .filter_map(|(label, count)| {
            let n: u32 = count.as_deref()?.trim().parse().ok()?;
            (n > 0).then(|| format!("{n} {label}"))
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" · "))
    }
}

/// Returns the lottery's nonzero applied-unit counts per AMI tier, in tier
/// order.
#[must_use]
pub fn income_tiers(lottery: &HousingConnectLottery) -> Vec<TierCount> {
    AmiTier::ALL
        .into_iter()
        .filter_map(|tier| {
            let count = lottery.applied_units(tier);
            (count > 0).then_some(TierCount { tier, count })
        })
        .collect()
}

/// Returns the lottery's nonzero set-aside preferences.
#[must_use]
pub fn preferences(lottery: &HousingConnectLottery) -> Vec<Preference> {
    let fields = [
        ("Community Board", &lottery.lottery_community_board_percent),
        ("NYCHA Residents", &lottery.lottery_nycha_percent),
        (
            "Municipal Employees / Veterans",
            &lottery.lottery_municipal_employee_percent,
        ),
        ("Mobility Disability", &lottery.lottery_mobility_percent),
        (
            "Vision / Hearing Disability",
            &lottery.lottery_vision_hearing_percent,
        ),
        ("Seniors (62+)", &lottery.lottery_62_percent),
    ];

    fields
        .iter()
        .filter_map(|&(label, value)| {
            let percent: f64 = value.as_deref()?.trim().parse().ok()?;
            (percent > 0.0).then_some(Preference { label, percent })
        })
        .collect()
}

/// Returns whether a household at the given tier is eligible for the
/// lottery, i.e. the lottery has units at that tier.
#[must_use]
pub fn is_eligible(lottery: &HousingConnectLottery, tier: Option<AmiTier>) -> bool {
    tier.is_some_and(|t| lottery.applied_units(t) > 0)
}
