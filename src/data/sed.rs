//! Spectral energy distributions
//!
//! `seds.csv` stores, per galaxy, a flux and an error for each band and each
//! of four simulations. Column names are `<sim>-<band>` for fluxes and
//! `<sim>err-<band>` for errors.

use super::{DataError, Table, NAME_COLUMN};
use crate::palette::Rgb;
use crate::selection::EntityKey;
use std::collections::HashMap;

/// Photometric bands, ordered by wavelength
pub const BANDS: [&str; 20] = [
    "GALEX_FUV",
    "GALEX_NUV",
    "SDSS_u",
    "SDSS_g",
    "SDSS_r",
    "SDSS_i",
    "SDSS_z",
    "2MASS_J",
    "2MASS_H",
    "2MASS_Ks",
    "WISE_3.4",
    "WISE_4.6",
    "WISE_12",
    "WISE_22",
    "PACS_70",
    "PACS_100",
    "PACS_160",
    "SPIRE_250",
    "SPIRE_350",
    "SPIRE_500",
];

/// Effective wavelength of each band in µm
pub const WAVELENGTHS: [f64; 20] = [
    0.153, 0.229, 0.355, 0.480, 0.624, 0.766, 0.908, 1.235, 1.645, 2.160, 3.368, 4.617, 12.069,
    22.195, 70.73, 100.651, 160.976, 252.104, 353.052, 513.118,
];

/// Far-infrared bands predicted by the model
pub const FIR_BANDS: [&str; 6] = [
    "PACS_70",
    "PACS_100",
    "PACS_160",
    "SPIRE_250",
    "SPIRE_350",
    "SPIRE_500",
];

/// One of the four flux sets stored per galaxy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Simulation {
    Short,
    Pred,
    Full,
    Obs,
}

impl Simulation {
    pub const ALL: [Simulation; 4] = [Self::Short, Self::Pred, Self::Full, Self::Obs];

    /// Column prefix
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Pred => "pred",
            Self::Full => "full",
            Self::Obs => "obs",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Self::Short => Rgb(0xe4, 0x1a, 0x1c),
            Self::Pred => Rgb(0xff, 0x7e, 0x19),
            Self::Full => Rgb(0x37, 0x7e, 0xb8),
            Self::Obs => Rgb::BLACK,
        }
    }

    pub fn flux_column(self, band: &str) -> String {
        format!("{}-{}", self.prefix(), band)
    }

    pub fn error_column(self, band: &str) -> String {
        format!("{}err-{}", self.prefix(), band)
    }
}

/// The points of one simulation for one galaxy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SedSeries {
    pub wavelengths: Vec<f64>,
    pub fluxes: Vec<f64>,
    pub errors: Vec<f64>,
    pub bands: Vec<&'static str>,
}

impl SedSeries {
    pub fn len(&self) -> usize {
        self.fluxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fluxes.is_empty()
    }
}

/// Galaxy name to row index over a loaded SED table
#[derive(Debug, Clone)]
pub struct SedCatalog {
    table: Table,
    rows: HashMap<EntityKey, usize>,
    names: Vec<EntityKey>,
}

impl SedCatalog {
    pub fn from_table(table: Table, origin: &str) -> Result<Self, DataError> {
        table.require(&[NAME_COLUMN], origin)?;

        let mut rows = HashMap::with_capacity(table.len());
        let mut names = Vec::with_capacity(table.len());
        for row in 0..table.len() {
            let Some(name) = table.get(row, NAME_COLUMN) else {
                tracing::warn!("{}: row {} has no galaxy name, skipped", origin, row + 1);
                continue;
            };
            let key = EntityKey::from(name);
            if rows.insert(key.clone(), row).is_some() {
                tracing::warn!("{}: duplicate galaxy '{}', keeping last row", origin, key);
            } else {
                names.push(key);
            }
        }
        names.sort();

        Ok(Self { table, rows, names })
    }

    /// Galaxy names in sorted order
    pub fn names(&self) -> &[EntityKey] {
        &self.names
    }

    pub fn contains(&self, key: &EntityKey) -> bool {
        self.rows.contains_key(key)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Row index of a galaxy
    pub fn row(&self, key: &EntityKey) -> Option<usize> {
        self.rows.get(key).copied()
    }

    /// Bands with a non-empty flux for `sim`. Missing or unparsable errors
    /// count as zero.
    pub fn series(&self, key: &EntityKey, sim: Simulation) -> Option<SedSeries> {
        let row = self.row(key)?;
        let mut series = SedSeries::default();
        for (band, wl) in BANDS.iter().zip(WAVELENGTHS) {
            let Some(flux) = self.table.number(row, &sim.flux_column(band)) else {
                continue;
            };
            let err = self
                .table
                .number(row, &sim.error_column(band))
                .unwrap_or(0.0);
            series.wavelengths.push(wl);
            series.fluxes.push(flux);
            series.errors.push(err);
            series.bands.push(band);
        }
        Some(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SedCatalog {
        let csv = "\
galname,obs-PACS_70,obserr-PACS_70,obs-PACS_100,obserr-PACS_100,pred-PACS_70,prederr-PACS_70,obs-GALEX_FUV
G2,21.5,0.1,,,21.4,,20.0
G1,22.0,x,22.3,0.2,22.1,0.05,
G1,23.0,0.3,23.3,0.2,23.1,0.05,
";
        SedCatalog::from_table(Table::parse(csv, "seds").unwrap(), "seds").unwrap()
    }

    #[test]
    fn names_sorted_and_deduplicated() {
        let c = catalog();
        assert_eq!(c.names(), &[EntityKey::from("G1"), EntityKey::from("G2")]);
        // Last duplicate wins
        assert_eq!(c.row(&"G1".into()), Some(2));
    }

    #[test]
    fn empty_flux_skips_band() {
        let c = catalog();
        let obs = c.series(&"G2".into(), Simulation::Obs).unwrap();
        assert_eq!(obs.bands, vec!["GALEX_FUV", "PACS_70"]);
        assert_eq!(obs.wavelengths, vec![0.153, 70.73]);
        assert_eq!(obs.fluxes, vec![20.0, 21.5]);
        // GALEX error column is absent
        assert_eq!(obs.errors, vec![0.0, 0.1]);
    }

    #[test]
    fn missing_error_defaults_to_zero() {
        let c = catalog();
        let pred = c.series(&"G2".into(), Simulation::Pred).unwrap();
        assert_eq!(pred.fluxes, vec![21.4]);
        assert_eq!(pred.errors, vec![0.0]);
    }

    #[test]
    fn unknown_galaxy() {
        assert!(catalog().series(&"nope".into(), Simulation::Obs).is_none());
    }

    #[test]
    fn simulation_without_columns_is_empty() {
        let full = catalog().series(&"G1".into(), Simulation::Full).unwrap();
        assert!(full.is_empty());
    }

    #[test]
    fn column_naming() {
        assert_eq!(Simulation::Full.flux_column("WISE_3.4"), "full-WISE_3.4");
        assert_eq!(Simulation::Obs.error_column("PACS_70"), "obserr-PACS_70");
    }

    #[test]
    fn missing_name_column() {
        let table = Table::parse("name,x\nA,1\n", "seds").unwrap();
        assert!(matches!(
            SedCatalog::from_table(table, "seds"),
            Err(DataError::MissingColumn { .. })
        ));
    }
}
