//! Header-row column resolution.
//!
//! Column positions are discovered once from the parsed header row and held
//! in an index struct, so per-row field access is a plain slice index and a
//! missing column is caught up front as a fatal error instead of silently
//! producing empty fields.

use std::path::Path;

use crate::error::ParseError;

/// Legacy per-year stabilized-unit columns in the primary file, newest
/// first (the normalizer scans them in this order).
pub const LEGACY_UNIT_YEARS: [u16; 11] = [
    2017, 2016, 2015, 2014, 2013, 2012, 2011, 2010, 2009, 2008, 2007,
];

/// Abatement-code years in the primary file, newest first.
pub const ABATEMENT_YEARS: [u16; 4] = [2017, 2016, 2015, 2014];

/// Supplemental-file unit-count years, newest first.
pub const V2_UNIT_YEARS: [u16; 6] = [2023, 2022, 2021, 2020, 2019, 2018];

fn require(header: &[String], name: &str, path: &Path) -> Result<usize, ParseError> {
    header
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| ParseError::MissingColumn {
            name: name.to_string(),
            path: path.to_path_buf(),
        })
}

/// Resolved column indices for the primary (joined rent-stabilization) file.
#[derive(Debug, Clone)]
pub struct PrimaryColumns {
    pub borough: usize,
    pub address: usize,
    pub ownername: usize,
    pub zipcode: usize,
    pub lat: usize,
    pub lon: usize,
    pub yearbuilt: usize,
    pub numfloors: usize,
    pub unitsres: usize,
    pub unitstotal: usize,
    pub ucbbl: usize,
    /// `(year, index)` for the `{year}uc` columns, newest year first.
    pub unit_counts: Vec<(u16, usize)>,
    /// `(year, index)` for the `{year}abat` columns, newest year first.
    pub abatements: Vec<(u16, usize)>,
}

impl PrimaryColumns {
    /// Resolves all required primary-file columns from the header row.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingColumn`] when any required column is
    /// absent.
    pub fn resolve(header: &[String], path: &Path) -> Result<Self, ParseError> {
        let unit_counts = LEGACY_UNIT_YEARS
            .iter()
            .map(|&year| Ok((year, require(header, &format!("{year}uc"), path)?)))
            .collect::<Result<Vec<_>, ParseError>>()?;

        let abatements = ABATEMENT_YEARS
            .iter()
            .map(|&year| Ok((year, require(header, &format!("{year}abat"), path)?)))
            .collect::<Result<Vec<_>, ParseError>>()?;

        Ok(Self {
            borough: require(header, "borough", path)?,
            address: require(header, "address", path)?,
            ownername: require(header, "ownername", path)?,
            zipcode: require(header, "zipcode", path)?,
            lat: require(header, "lat", path)?,
            lon: require(header, "lon", path)?,
            yearbuilt: require(header, "yearbuilt", path)?,
            numfloors: require(header, "numfloors", path)?,
            unitsres: require(header, "unitsres", path)?,
            unitstotal: require(header, "unitstotal", path)?,
            ucbbl: require(header, "ucbbl", path)?,
            unit_counts,
            abatements,
        })
    }
}

/// Resolved column indices for the supplemental 2018-2023 file.
#[derive(Debug, Clone)]
pub struct V2Columns {
    pub ucbbl: usize,
    /// `(year, index)` for the `uc{year}` columns, newest year first.
    pub unit_counts: Vec<(u16, usize)>,
}

impl V2Columns {
    /// Resolves all required supplemental-file columns from the header row.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingColumn`] when any required column is
    /// absent.
    pub fn resolve(header: &[String], path: &Path) -> Result<Self, ParseError> {
        let unit_counts = V2_UNIT_YEARS
            .iter()
            .map(|&year| Ok((year, require(header, &format!("uc{year}"), path)?)))
            .collect::<Result<Vec<_>, ParseError>>()?;

        Ok(Self {
            ucbbl: require(header, "ucbbl", path)?,
            unit_counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn primary_header() -> Vec<String> {
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
        names
    }

    #[test]
    fn resolves_primary_columns() {
        let header = primary_header();
        let cols = PrimaryColumns::resolve(&header, &PathBuf::from("test.csv")).unwrap();

        assert_eq!(cols.ucbbl, 0);
        assert_eq!(cols.borough, 1);
        assert_eq!(cols.unit_counts.len(), 11);
        assert_eq!(cols.abatements.len(), 4);

        // Newest year first
        assert_eq!(cols.unit_counts[0].0, 2017);
        assert_eq!(cols.unit_counts[10].0, 2007);
        assert_eq!(cols.abatements[0].0, 2017);

        // Index points at the right header cell
        let (year, index) = cols.unit_counts[0];
        assert_eq!(header[index], format!("{year}uc"));
    }

    #[test]
    fn missing_column_is_fatal() {
        let mut names = primary_header();
        names.retain(|n| n != "zipcode");
        let err = PrimaryColumns::resolve(&names, &PathBuf::from("test.csv")).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingColumn { ref name, .. } if name == "zipcode"
        ));
    }

    #[test]
    fn resolves_v2_columns() {
        let names = header(&[
            "ucbbl", "uc2018", "uc2019", "uc2020", "uc2021", "uc2022", "uc2023",
        ]);
        let cols = V2Columns::resolve(&names, &PathBuf::from("v2.csv")).unwrap();
        assert_eq!(cols.ucbbl, 0);
        assert_eq!(cols.unit_counts[0], (2023, 6));
        assert_eq!(cols.unit_counts[5], (2018, 1));
    }
}
