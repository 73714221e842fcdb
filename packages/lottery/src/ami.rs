//! HUD FY2025 Area Median Income limits for the NYC metro area.
//!
//! Used to determine Housing Connect lottery eligibility tiers. Base AMI
//! (4-person household) is ~$156,000; the limits below are rounded from the
//! HUD FY2025 tables for the NYC metro HMFA.

use stabmap_lottery_models::AmiTier;

/// The AMI percentage columns of the income-limit table, in tier order.
pub const AMI_PERCENTS: [u32; 5] = [30, 50, 80, 120, 165];

/// Maximum annual incomes by household size (rows, 1 through 8+ persons)
/// and AMI percentage (columns 30/50/80/120/165).
const INCOME_LIMITS: [[u32; 5]; 8] = [
    // 1 person
    [32_850, 54_750, 87_600, 131_400, 180_675],
    // 2 persons
    [37_550, 62_550, 100_050, 150_100, 206_375],
    // 3 persons
    [42_250, 70_350, 112_550, 168_850, 232_150],
    // 4 persons
    [46_900, 78_150, 125_050, 187_550, 257_900],
    // 5 persons
    [50_700, 84_450, 135_100, 202_650, 278_650],
    // 6 persons
    [54_450, 90_700, 145_100, 217_650, 299_250],
    // 7 persons
    [58_200, 96_950, 155_100, 232_650, 319_900],
    // 8+ persons
    [61_950, 103_250, 165_100, 247_650, 340_475],
];

/// Clamps a household size to a row index of the income-limit table.
/// Households larger than 8 reuse the 8-person row; sizes below 1 use
/// the 1-person row.
fn size_row(household_size: u32) -> &'static [u32; 5] {
    let index = household_size.saturating_sub(1).min(7) as usize;
    &INCOME_LIMITS[index]
}

/// Returns the most restrictive AMI tier whose income limit the household's
/// annual income does not exceed.
///
/// Total over all inputs: incomes above the 165% limit fall into
/// [`AmiTier::Above`].
#[must_use]
pub fn ami_tier(household_size: u32, annual_income: u32) -> AmiTier {
    let limits = size_row(household_size);

    if annual_income <= limits[0] {
        AmiTier::ExtLow
    } else if annual_income <= limits[1] {
        AmiTier::VeryLow
    } else if annual_income <= limits[2] {
        AmiTier::Low
    } else if annual_income <= limits[3] {
        AmiTier::Moderate
    } else if annual_income <= limits[4] {
        AmiTier::Middle
    } else {
        AmiTier::Above
    }
}

/// Returns the maximum annual income for a household size at the given AMI
/// percentage, or `None` when the percentage is not one of the table's
/// columns (30/50/80/120/165).
#[must_use]
pub fn income_limit(household_size: u32, ami_percent: u32) -> Option<u32> {
    let column = AMI_PERCENTS.iter().position(|&p| p == ami_percent)?;
    Some(size_row(household_size)[column])
}
