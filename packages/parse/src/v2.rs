//! Supplemental 2018-2023 reconciliation index.
//!
//! The supplemental extract carries stabilized-unit counts the joined file
//! stops at 2017 for. Each building keeps only its most recent nonzero
//! count; the normalizer prefers this over the legacy per-year columns.

use std::collections::BTreeMap;
use std::path::Path;

use stabmap_building_models::V2Entry;

use crate::columns::V2Columns;
use crate::error::ParseError;
use crate::num::positive_count;
use crate::{csv, read_lines};

/// Loads the supplemental file and builds the building-id → latest-count
/// index.
///
/// Rows with a blank `ucbbl` are skipped entirely. Rows with no positive
/// count in any year are still recorded, with an empty [`V2Entry`] —
/// "known building, no positive count" is distinct from "unknown building".
///
/// # Errors
///
/// Returns an error if the file cannot be read, is empty, or its header
/// lacks a required column.
pub fn load_v2_index(path: &Path) -> Result<BTreeMap<String, V2Entry>, ParseError> {
    let lines = read_lines(path)?;
    let Some((header_line, data_lines)) = lines.split_first() else {
        return Err(ParseError::EmptyFile {
            path: path.to_path_buf(),
        });
    };

    let header = csv::parse_line(header_line);
    let cols = V2Columns::resolve(&header, path)?;

    let mut index = BTreeMap::new();

    for line in data_lines {
        let fields = csv::parse_line(line);

        let ucbbl = fields.get(cols.ucbbl).map_or("", |f| f.trim());
        if ucbbl.is_empty() {
            continue;
        }

        let mut entry = V2Entry::default();
        for &(year, idx) in &cols.unit_counts {
            let value = fields.get(idx).map_or("", String::as_str);
            if let Some(units) = positive_count(value) {
                entry.latest_units = Some(units);
                entry.latest_year = Some(year.to_string());
                break;
            }
        }

        index.insert(ucbbl.to_string(), entry);
    }

    log::info!("Loaded {} records from v2 (2018-2023) data", index.len());

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_v2(name: &str, body: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let content = format!("ucbbl,uc2018,uc2019,uc2020,uc2021,uc2022,uc2023\n{body}");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn prefers_latest_nonzero_year() {
        let path = write_v2("stabmap_v2_latest.csv", "1001230001,10,11,12,13,14,15\n");
        let index = load_v2_index(&path).unwrap();
        let entry = &index["1001230001"];
        assert_eq!(entry.latest_units, Some(15));
        assert_eq!(entry.latest_year.as_deref(), Some("2023"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn falls_back_past_zero_years() {
        let path = write_v2("stabmap_v2_zero.csv", "1001230001,10,11,12,0,0,0\n");
        let index = load_v2_index(&path).unwrap();
        let entry = &index["1001230001"];
        assert_eq!(entry.latest_units, Some(12));
        assert_eq!(entry.latest_year.as_deref(), Some("2020"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn records_empty_entry_when_no_positive_count() {
        let path = write_v2("stabmap_v2_empty.csv", "1001230001,0,0,,,bad,0\n");
        let index = load_v2_index(&path).unwrap();
        let entry = &index["1001230001"];
        assert_eq!(entry.latest_units, None);
        assert_eq!(entry.latest_year, None);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn skips_rows_with_blank_identifier() {
        let path = write_v2("stabmap_v2_blank.csv", " ,1,2,3,4,5,6\n1000010001,0,0,0,0,0,7\n");
        let index = load_v2_index(&path).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index["1000010001"].latest_units, Some(7));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_column_is_fatal() {
        let path = std::env::temp_dir().join("stabmap_v2_missing_col.csv");
        std::fs::write(&path, "ucbbl,uc2018\n1,2\n").unwrap();
        assert!(matches!(
            load_v2_index(&path),
            Err(ParseError::MissingColumn { .. })
        ));
        let _ = std::fs::remove_file(&path);
    }
}
