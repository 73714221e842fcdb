//! Primary-row validation and normalization.
//!
//! One parsed row in, one compact [`BuildingRecord`] out — or a drop
//! decision tallied on the [`RunReport`]. Nothing at row level is an error:
//! rows missing a borough or address are skipped and counted, bad fields
//! are nulled in place, and the record survives.

use std::collections::BTreeMap;

use regex::Regex;
use stabmap_building_models::{Borough, BuildingRecord, V2Entry};

use crate::columns::PrimaryColumns;
use crate::num::{parse_float, parse_int, positive_count};

/// Minimum parsed field count for a primary data row. Shorter rows are
/// treated as CSV corruption or schema drift and skipped outright.
pub const MIN_PRIMARY_FIELDS: usize = 59;

/// Run-scoped skip and fix tallies, surfaced in the end-of-run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Rows dropped for a missing or unrecognized borough code.
    pub skipped_no_borough: u64,
    /// Rows dropped for a missing address.
    pub skipped_no_address: u64,
    /// Rows dropped for having fewer than [`MIN_PRIMARY_FIELDS`] fields.
    pub skipped_short_rows: u64,
    /// Records kept with an invalid zip emptied out.
    pub bad_zip_fixed: u64,
}

/// Normalizes primary-file rows into [`BuildingRecord`]s.
pub struct Normalizer<'a> {
    cols: &'a PrimaryColumns,
    v2_index: &'a BTreeMap<String, V2Entry>,
    zip_re: Regex,
}

impl<'a> Normalizer<'a> {
    /// Creates a normalizer over the resolved columns and the supplemental
    /// reconciliation index.
    ///
    /// # Panics
    ///
    /// Never panics: the zip regex is a valid literal pattern.
    #[must_use]
    pub fn new(cols: &'a PrimaryColumns, v2_index: &'a BTreeMap<String, V2Entry>) -> Self {
        Self {
            cols,
            v2_index,
            zip_re: Regex::new(r"^\d{5}$").unwrap_or_else(|_| unreachable!()),
        }
    }

    /// Normalizes one data row.
    ///
    /// `row_index` is the 1-based position of the row in the data file and
    /// doubles as the synthetic identifier when `ucbbl` is blank. Returns
    /// `None` when the row is dropped; every drop and fix is tallied on
    /// `report`.
    #[must_use]
    pub fn normalize_row(
        &self,
        row_index: usize,
        fields: &[String],
        report: &mut RunReport,
    ) -> Option<BuildingRecord> {
        if fields.len() < MIN_PRIMARY_FIELDS {
            report.skipped_short_rows += 1;
            return None;
        }

        let field = |idx: usize| fields.get(idx).map_or("", String::as_str);
        let trimmed = |idx: usize| field(idx).trim();

        let Some(borough) = Borough::from_code(trimmed(self.cols.borough)) else {
            report.skipped_no_borough += 1;
            return None;
        };

        let address = trimmed(self.cols.address);
        if address.is_empty() {
            report.skipped_no_address += 1;
            return None;
        }

        let zipcode = trimmed(self.cols.zipcode);
        let valid_zip = if self.zip_re.is_match(zipcode) {
            zipcode
        } else {
            if !zipcode.is_empty() {
                report.bad_zip_fixed += 1;
            }
            ""
        };

        let year_built = parse_int(field(self.cols.yearbuilt))
            .filter(|&y| (1800..=2025).contains(&y))
            .and_then(|y| u32::try_from(y).ok());

        let ucbbl = trimmed(self.cols.ucbbl);
        let (stabilized_units, data_year) = self.resolve_stabilized_units(ucbbl, fields);

        let abatement = self
            .cols
            .abatements
            .iter()
            .map(|&(_, idx)| trimmed(idx))
            .find(|v| !v.is_empty())
            .unwrap_or("");

        let identifier = if ucbbl.is_empty() {
            row_index.to_string()
        } else {
            ucbbl.to_string()
        };

        Some(BuildingRecord {
            i: identifier,
            b: borough,
            a: address.to_string(),
            o: trimmed(self.cols.ownername).to_string(),
            z: valid_zip.to_string(),
            la: parse_float(field(self.cols.lat)).map(round4),
            lo: parse_float(field(self.cols.lon)).map(round4),
            yb: year_built,
            fl: positive_count(field(self.cols.numfloors)),
            ur: positive_count(field(self.cols.unitsres)),
            ut: positive_count(field(self.cols.unitstotal)),
            su: stabilized_units,
            dy: data_year,
            ab: abatement.to_string(),
        })
    }

    /// Resolves the stabilized-unit count: supplemental index first
    /// (latest nonzero 2018-2023), then the legacy per-year columns newest
    /// to oldest.
    fn resolve_stabilized_units(
        &self,
        ucbbl: &str,
        fields: &[String],
    ) -> (Option<u32>, Option<String>) {
        if let Some(entry) = self.v2_index.get(ucbbl)
            && let Some(units) = entry.latest_units
        {
            return (Some(units), entry.latest_year.clone());
        }

        for &(year, idx) in &self.cols.unit_counts {
            let value = fields.get(idx).map_or("", String::as_str);
            if let Some(units) = positive_count(value) {
                return (Some(units), Some(year.to_string()));
            }
        }

        (None, None)
    }
}

/// Coordinates are rounded to 4 decimal places (~11 m) to keep the output
/// files small.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::parse_line;
    use std::path::PathBuf;

    /// Builds a 59-column primary header matching the real extract's
    /// column set, with filler columns so data rows hit the minimum width.
    fn test_header() -> Vec<String> {
        let mut names = vec![
            "ucbbl".to_string(),
            "borough".to_string(),
            "address".to_string(),
            "ownername".to_string(),
            "zipcode".to_string(),
            "lat".to_string(),
            "lon".to_string(),
            "yearbuilt".to_string(),
            "numfloors".to_string(),
            "unitsres".to_string(),
            "unitstotal".to_string(),
        ];
        for year in 2007..=2017 {
            names.push(format!("{year}uc"));
        }
        for year in 2014..=2017 {
            names.push(format!("{year}abat"));
        }
        let filler = MIN_PRIMARY_FIELDS - names.len();
        for n in 0..filler {
            names.push(format!("extra{n}"));
        }
        names
    }

    fn columns() -> PrimaryColumns {
        PrimaryColumns::resolve(&test_header(), &PathBuf::from("test.csv")).unwrap()
    }

    /// A full-width row with the named cells overridden.
    fn row(overrides: &[(usize, &str)]) -> Vec<String> {
        let mut fields = vec![String::new(); MIN_PRIMARY_FIELDS];
        for &(idx, value) in overrides {
            fields[idx] = value.to_string();
        }
        fields
    }

    #[test]
    fn normalizes_a_full_row() {
        let cols = columns();
        let v2 = BTreeMap::new();
        let normalizer = Normalizer::new(&cols, &v2);
        let mut report = RunReport::default();

        let fields = row(&[
            (cols.ucbbl, "1001230001"),
            (cols.borough, "MN"),
            (cols.address, " 123 MAIN ST "),
            (cols.ownername, "SMITH, JOHN"),
            (cols.zipcode, "10025"),
            (cols.lat, "40.78914"),
            (cols.lon, "-73.97126"),
            (cols.yearbuilt, "1925"),
            (cols.numfloors, "6.00000"),
            (cols.unitsres, "40"),
            (cols.unitstotal, "42"),
            (cols.unit_counts[0].1, "40"),
            (cols.abatements[1].1, "J51"),
        ]);

        let record = normalizer.normalize_row(1, &fields, &mut report).unwrap();
        assert_eq!(record.i, "1001230001");
        assert_eq!(record.b, Borough::Manhattan);
        assert_eq!(record.a, "123 MAIN ST");
        assert_eq!(record.o, "SMITH, JOHN");
        assert_eq!(record.z, "10025");
        assert_eq!(record.la, Some(40.7891));
        assert_eq!(record.lo, Some(-73.9713));
        assert_eq!(record.yb, Some(1925));
        assert_eq!(record.fl, Some(6));
        assert_eq!(record.su, Some(40));
        assert_eq!(record.dy.as_deref(), Some("2017"));
        assert_eq!(record.ab, "J51");
        assert_eq!(report, RunReport::default());
    }

    #[test]
    fn drops_short_rows() {
        let cols = columns();
        let v2 = BTreeMap::new();
        let normalizer = Normalizer::new(&cols, &v2);
        let mut report = RunReport::default();

        let fields = parse_line("1001230001,MN,123 MAIN ST");
        assert!(normalizer.normalize_row(1, &fields, &mut report).is_none());
        assert_eq!(report.skipped_short_rows, 1);
    }

    #[test]
    fn drops_unknown_borough() {
        let cols = columns();
        let v2 = BTreeMap::new();
        let normalizer = Normalizer::new(&cols, &v2);
        let mut report = RunReport::default();

        let fields = row(&[(cols.borough, "XX"), (cols.address, "1 BROADWAY")]);
        assert!(normalizer.normalize_row(1, &fields, &mut report).is_none());
        let fields = row(&[(cols.address, "1 BROADWAY")]);
        assert!(normalizer.normalize_row(2, &fields, &mut report).is_none());
        assert_eq!(report.skipped_no_borough, 2);
    }

    #[test]
    fn drops_missing_address() {
        let cols = columns();
        let v2 = BTreeMap::new();
        let normalizer = Normalizer::new(&cols, &v2);
        let mut report = RunReport::default();

        let fields = row(&[(cols.borough, "BK"), (cols.address, "   ")]);
        assert!(normalizer.normalize_row(1, &fields, &mut report).is_none());
        assert_eq!(report.skipped_no_address, 1);
    }

    #[test]
    fn empties_invalid_zip_but_keeps_record() {
        let cols = columns();
        let v2 = BTreeMap::new();
        let normalizer = Normalizer::new(&cols, &v2);
        let mut report = RunReport::default();

        let fields = row(&[
            (cols.borough, "MN"),
            (cols.address, "123 MAIN ST"),
            (cols.zipcode, "1003A"),
        ]);
        let record = normalizer.normalize_row(1, &fields, &mut report).unwrap();
        assert_eq!(record.z, "");
        assert_eq!(report.bad_zip_fixed, 1);

        // An absent zip is not a "fix"
        let fields = row(&[(cols.borough, "MN"), (cols.address, "125 MAIN ST")]);
        let record = normalizer.normalize_row(2, &fields, &mut report).unwrap();
        assert_eq!(record.z, "");
        assert_eq!(report.bad_zip_fixed, 1);
    }

    #[test]
    fn nulls_out_of_range_year_built() {
        let cols = columns();
        let v2 = BTreeMap::new();
        let normalizer = Normalizer::new(&cols, &v2);
        let mut report = RunReport::default();

        for (value, expected) in [
            ("1799", None),
            ("1800", Some(1800)),
            ("2025", Some(2025)),
            ("2026", None),
            ("0", None),
            ("garbage", None),
        ] {
            let fields = row(&[
                (cols.borough, "QN"),
                (cols.address, "1 MAIN ST"),
                (cols.yearbuilt, value),
            ]);
            let record = normalizer.normalize_row(1, &fields, &mut report).unwrap();
            assert_eq!(record.yb, expected, "yearbuilt {value}");
        }
    }

    #[test]
    fn v2_index_wins_over_legacy_columns() {
        let cols = columns();
        let mut v2 = BTreeMap::new();
        v2.insert(
            "1001230001".to_string(),
            V2Entry {
                latest_units: Some(38),
                latest_year: Some("2023".to_string()),
            },
        );
        let normalizer = Normalizer::new(&cols, &v2);
        let mut report = RunReport::default();

        let fields = row(&[
            (cols.ucbbl, "1001230001"),
            (cols.borough, "MN"),
            (cols.address, "123 MAIN ST"),
            (cols.unit_counts[0].1, "40"),
        ]);
        let record = normalizer.normalize_row(1, &fields, &mut report).unwrap();
        assert_eq!(record.su, Some(38));
        assert_eq!(record.dy.as_deref(), Some("2023"));
    }

    #[test]
    fn empty_v2_entry_falls_back_to_legacy_scan() {
        let cols = columns();
        let mut v2 = BTreeMap::new();
        v2.insert("1001230001".to_string(), V2Entry::default());
        let normalizer = Normalizer::new(&cols, &v2);
        let mut report = RunReport::default();

        // 2017 is zero, 2015 has the first nonzero count
        let fields = row(&[
            (cols.ucbbl, "1001230001"),
            (cols.borough, "MN"),
            (cols.address, "123 MAIN ST"),
            (cols.unit_counts[0].1, "0"),
            (cols.unit_counts[2].1, "22"),
        ]);
        let record = normalizer.normalize_row(1, &fields, &mut report).unwrap();
        assert_eq!(record.su, Some(22));
        assert_eq!(record.dy.as_deref(), Some("2015"));
    }

    #[test]
    fn no_count_anywhere_is_null_not_error() {
        let cols = columns();
        let v2 = BTreeMap::new();
        let normalizer = Normalizer::new(&cols, &v2);
        let mut report = RunReport::default();

        let fields = row(&[(cols.borough, "SI"), (cols.address, "9 HYLAN BLVD")]);
        let record = normalizer.normalize_row(1, &fields, &mut report).unwrap();
        assert_eq!(record.su, None);
        assert_eq!(record.dy, None);
        assert_eq!(record.ab, "");
    }

    #[test]
    fn abatement_prefers_newest_year() {
        let cols = columns();
        let v2 = BTreeMap::new();
        let normalizer = Normalizer::new(&cols, &v2);
        let mut report = RunReport::default();

        let fields = row(&[
            (cols.borough, "BX"),
            (cols.address, "1 GRAND CONCOURSE"),
            (cols.abatements[0].1, "421a"),
            (cols.abatements[3].1, "J51"),
        ]);
        let record = normalizer.normalize_row(1, &fields, &mut report).unwrap();
        assert_eq!(record.ab, "421a");
    }

    #[test]
    fn blank_ucbbl_gets_synthetic_row_identifier() {
        let cols = columns();
        let v2 = BTreeMap::new();
        let normalizer = Normalizer::new(&cols, &v2);
        let mut report = RunReport::default();

        let fields = row(&[(cols.borough, "BK"), (cols.address, "55 FLATBUSH AVE")]);
        let record = normalizer.normalize_row(17, &fields, &mut report).unwrap();
        assert_eq!(record.i, "17");
    }

    #[test]
    fn synthetic_identifier_can_collide_with_real_one() {
        // A genuine ucbbl equal to a row index string is indistinguishable
        // from a synthetic identifier. Known edge case: uniqueness is not
        // enforced, both records survive.
        let cols = columns();
        let v2 = BTreeMap::new();
        let normalizer = Normalizer::new(&cols, &v2);
        let mut report = RunReport::default();

        let real = row(&[
            (cols.ucbbl, "17"),
            (cols.borough, "BK"),
            (cols.address, "1 COURT ST"),
        ]);
        let synthetic = row(&[(cols.borough, "BK"), (cols.address, "2 COURT ST")]);

        let a = normalizer.normalize_row(3, &real, &mut report).unwrap();
        let b = normalizer.normalize_row(17, &synthetic, &mut report).unwrap();
        assert_eq!(a.i, b.i);
    }

    #[test]
    fn zero_counts_are_nulled() {
        let cols = columns();
        let v2 = BTreeMap::new();
        let normalizer = Normalizer::new(&cols, &v2);
        let mut report = RunReport::default();

        let fields = row(&[
            (cols.borough, "MN"),
            (cols.address, "123 MAIN ST"),
            (cols.numfloors, "0"),
            (cols.unitsres, "bad"),
        ]);
        let record = normalizer.normalize_row(1, &fields, &mut report).unwrap();
        assert_eq!(record.fl, None);
        assert_eq!(record.ur, None);
        assert_eq!(record.ut, None);
        assert_eq!(record.la, None);
        assert_eq!(record.lo, None);
    }
}
