#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Batch pipeline transforming two rent-stabilization CSV extracts into the
//! per-borough JSON files and aggregate statistics the web frontend loads.
//!
//! Single-threaded, single-pass, run-to-completion: CSV files → parsed rows
//! → normalized [`BuildingRecord`]s → sorted/aggregated → JSON artifacts.
//! Data-quality problems never abort the run — rows are skipped and tallied,
//! bad fields are nulled in place. Only file-level I/O and a header missing
//! a required column are fatal.

pub mod aggregate;
pub mod columns;
pub mod csv;
pub mod error;
pub mod normalize;
pub mod num;
pub mod v2;
pub mod writer;

use std::path::Path;
use std::time::Instant;

use stabmap_building_models::{BuildingRecord, DatasetStats};

pub use error::ParseError;
use normalize::{Normalizer, RunReport};

/// Primary input: the joined rent-stabilization history extract.
pub const PRIMARY_CSV_PATH: &str = "data/rentstab_joined.csv";

/// Supplemental input: 2018-2023 unit counts keyed by `ucbbl`.
pub const V2_CSV_PATH: &str = "data/rentstab_v2_2018_2023.csv";

/// Output directory for the per-borough and unified record files, served
/// statically to the frontend.
pub const PUBLIC_DATA_DIR: &str = "public/data";

/// Output directory for the stats document, imported by the frontend build.
pub const SRC_DATA_DIR: &str = "src/data";

/// Everything a completed run produced, for reporting and tests.
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    /// Skip and fix tallies.
    pub report: RunReport,
    /// The aggregate statistics that were written to `stats.json`.
    pub stats: DatasetStats,
}

/// Reads a text file into its non-blank lines, stripping any trailing `\r`.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_lines(path: &Path) -> Result<Vec<String>, ParseError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(raw
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .filter(|l| !l.trim().is_empty())
        .map(ToString::to_string)
        .collect())
}

/// Runs the full pipeline: load the supplemental index, normalize the
/// primary file, sort, aggregate, and write all JSON artifacts.
///
/// The binary passes the fixed repository-relative paths; tests drive this
/// against temp directories.
///
/// # Errors
///
/// Returns an error if an input file is missing or unreadable, a required
/// column is absent, or an output file cannot be written.
pub fn run(
    primary_path: &Path,
    v2_path: &Path,
    data_dir: &Path,
    stats_dir: &Path,
) -> Result<PipelineSummary, ParseError> {
    let start = Instant::now();

    let v2_index = v2::load_v2_index(v2_path)?;

    let lines = read_lines(primary_path)?;
    let Some((header_line, data_lines)) = lines.split_first() else {
        return Err(ParseError::EmptyFile {
            path: primary_path.to_path_buf(),
        });
    };

    let header = csv::parse_line(header_line);
    let cols = columns::PrimaryColumns::resolve(&header, primary_path)?;

    log::info!("Columns: {}", header.len());
    log::info!(
        "zipcode col: {}, address col: {}, ownername col: {}",
        cols.zipcode,
        cols.address,
        cols.ownername
    );

    let normalizer = Normalizer::new(&cols, &v2_index);
    let mut report = RunReport::default();
    let mut records: Vec<BuildingRecord> = Vec::new();

    for (index, line) in data_lines.iter().enumerate() {
        let fields = csv::parse_line(line);
        if let Some(record) = normalizer.normalize_row(index + 1, &fields, &mut report) {
            records.push(record);
        }
    }

    aggregate::sort_records(&mut records);

    log::info!(
        "Skipped: {} no borough, {} no address, {} bad zipcodes fixed",
        report.skipped_no_borough,
        report.skipped_no_address,
        report.bad_zip_fixed
    );
    if report.skipped_short_rows > 0 {
        log::warn!("Skipped {} malformed short rows", report.skipped_short_rows);
    }

    let stats = aggregate::compute_stats(&records);

    writer::write_outputs(&records, &stats, data_dir, stats_dir)?;

    log::info!("Pipeline complete in {:.1}s", start.elapsed().as_secs_f64());

    Ok(PipelineSummary { report, stats })
}
