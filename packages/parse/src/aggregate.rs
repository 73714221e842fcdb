//! Dataset ordering and aggregate statistics.

use std::collections::BTreeMap;

use stabmap_building_models::{BuildingRecord, DatasetStats, ZipcodeStats};

/// How many zip codes the stats document ranks.
pub const TOP_ZIPCODES: usize = 25;

/// Sorts records by borough name, then address.
///
/// This is the order preserved in the per-borough and unified output files.
/// The sort is stable and byte-wise, so reruns on unchanged input produce
/// byte-identical output.
pub fn sort_records(records: &mut [BuildingRecord]) {
    records.sort_by(|a, b| a.b.cmp(&b.b).then_with(|| a.a.cmp(&b.a)));
}

/// Computes aggregate statistics over the (already sorted and filtered)
/// record array.
///
/// Records with no stabilized-unit count contribute 0 units. Boroughs with
/// no records are absent from `by_borough` rather than zero-filled. The
/// per-zip borough tag is last-record-wins in sort order.
#[must_use]
pub fn compute_stats(records: &[BuildingRecord]) -> DatasetStats {
    let mut stats = DatasetStats {
        total_buildings: records.len() as u64,
        ..DatasetStats::default()
    };

    struct ZipAccum {
        buildings: u64,
        units: u64,
        borough: stabmap_building_models::Borough,
    }

    let mut zip_data: BTreeMap<&str, ZipAccum> = BTreeMap::new();

    for record in records {
        let units = u64::from(record.su.unwrap_or(0));
        stats.total_stabilized_units += units;

        let borough_totals = stats
            .by_borough
            .entry(record.b.to_string())
            .or_default();
        borough_totals.buildings += 1;
        borough_totals.units += units;

        if !record.z.is_empty() {
            let accum = zip_data.entry(&record.z).or_insert(ZipAccum {
                buildings: 0,
                units: 0,
                borough: record.b,
            });
            accum.buildings += 1;
            accum.units += units;
            accum.borough = record.b;
        }

        if let Some(year) = record.yb {
            let decade = year / 10 * 10;
            *stats.year_built_distribution.entry(decade).or_insert(0) += 1;
        }
    }

    // Stable sort over the zip-ordered map walk keeps ties deterministic
    // (ascending zip).
    let mut ranked: Vec<ZipcodeStats> = zip_data
        .into_iter()
        .map(|(zipcode, accum)| ZipcodeStats {
            zipcode: zipcode.to_string(),
            buildings: accum.buildings,
            units: accum.units,
            borough: accum.borough,
        })
        .collect();
    ranked.sort_by(|a, b| b.units.cmp(&a.units));
    ranked.truncate(TOP_ZIPCODES);
    stats.top_zipcodes = ranked;

    stats
}
