//! JSON artifact output.
//!
//! Writes are full-file overwrites with no atomic rename: the pipeline is a
//! build-time, re-runnable step with no concurrent readers during
//! generation, so a crash mid-write is recovered by rerunning.

use std::fs;
use std::path::Path;

use stabmap_building_models::{Borough, BuildingRecord, DatasetStats};

use crate::error::ParseError;

/// Writes the per-borough files, the unified `all.json`, and the
/// pretty-printed `stats.json`.
///
/// Per-borough and unified files are compact JSON arrays in the records'
/// sort order; the stats document is pretty-printed with 2-space indent.
/// Both output directories are created if absent.
///
/// # Errors
///
/// Returns an error if a directory cannot be created, serialization fails,
/// or a file cannot be written.
#[allow(clippy::cast_precision_loss)]
pub fn write_outputs(
    records: &[BuildingRecord],
    stats: &DatasetStats,
    data_dir: &Path,
    stats_dir: &Path,
) -> Result<(), ParseError> {
    fs::create_dir_all(data_dir)?;
    fs::create_dir_all(stats_dir)?;

    for borough in Borough::ALL {
        let subset: Vec<&BuildingRecord> = records.iter().filter(|r| r.b == borough).collect();
        let json = serde_json::to_string(&subset)?;
        fs::write(data_dir.join(format!("{}.json", borough.slug())), &json)?;
        log::info!(
            "  {borough}: {} buildings ({} KB)",
            subset.len(),
            json.len() / 1024
        );
    }

    let all_json = serde_json::to_string(records)?;
    fs::write(data_dir.join("all.json"), &all_json)?;

    let stats_json = serde_json::to_string_pretty(stats)?;
    fs::write(stats_dir.join("stats.json"), stats_json)?;

    log::info!(
        "Total: {} buildings, {} stabilized units",
        stats.total_buildings,
        stats.total_stabilized_units
    );
    log::info!("All data: {:.1} MB", all_json.len() as f64 / 1024.0 / 1024.0);

    log::info!("Top 10 zipcodes:");
    for zip in stats.top_zipcodes.iter().take(10) {
        log::info!(
            "  {} ({}): {} units in {} buildings",
            zip.zipcode,
            zip.borough,
            zip.units,
            zip.buildings
        );
    }

    Ok(())
}
