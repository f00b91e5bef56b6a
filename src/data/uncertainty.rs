//! Uncertainty-validation dataset
//!
//! One row per galaxy with its predicted RMS uncertainty (`pred_unc`), the
//! prediction error (`y_diff`) and a point density. Rows named `binned`
//! carry the precomputed binned RMS curve instead of a galaxy.

use super::{DataError, Table, NAME_COLUMN};
use crate::analysis::{gaussian_kde_2d, rms, sliding_window};
use crate::selection::EntityKey;

pub const BINNED_NAME: &str = "binned";
const X_COLUMN: &str = "pred_unc";
const Y_COLUMN: &str = "y_diff";
const DENSITY_COLUMN: &str = "density";

/// Minimum points per window when the binned curve has to be derived
const BINNED_MIN_POINTS: usize = 80;

/// Where the density or binned curve came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    FromFile,
    Computed,
}

#[derive(Debug, Clone)]
pub struct UncertaintyData {
    pub names: Vec<EntityKey>,
    pub pred_unc: Vec<f64>,
    pub y_diff: Vec<f64>,
    pub density: Vec<f64>,
    pub binned_x: Vec<f64>,
    pub binned_y: Vec<f64>,
    pub density_source: Provenance,
    pub binned_source: Provenance,
}

impl UncertaintyData {
    pub fn from_table(table: &Table, origin: &str) -> Result<Self, DataError> {
        table.require(&[NAME_COLUMN, X_COLUMN, Y_COLUMN], origin)?;

        let mut names = Vec::new();
        let mut pred_unc = Vec::new();
        let mut y_diff = Vec::new();
        let mut density = Vec::new();
        let mut binned = Vec::new();
        let mut skipped = 0;

        for row in 0..table.len() {
            let (Some(name), Some(x), Some(y)) = (
                table.get(row, NAME_COLUMN),
                table.number(row, X_COLUMN),
                table.number(row, Y_COLUMN),
            ) else {
                skipped += 1;
                continue;
            };
            if name == BINNED_NAME {
                binned.push((x, y));
                continue;
            }
            names.push(EntityKey::from(name));
            pred_unc.push(x);
            y_diff.push(y);
            density.push(table.number(row, DENSITY_COLUMN));
        }

        if skipped > 0 {
            tracing::warn!("{}: skipped {} incomplete row(s)", origin, skipped);
        }
        if names.is_empty() {
            return Err(DataError::Empty {
                origin: origin.to_string(),
            });
        }

        let (density, density_source) = if density.iter().all(Option::is_some) {
            (density.into_iter().flatten().collect(), Provenance::FromFile)
        } else {
            tracing::info!("{}: density missing, estimating with KDE", origin);
            (gaussian_kde_2d(&pred_unc, &y_diff), Provenance::Computed)
        };

        let (binned_x, binned_y, binned_source) = if binned.is_empty() {
            tracing::info!("{}: no binned rows, computing sliding-window RMS", origin);
            let (bx, by) = sliding_window(&pred_unc, &y_diff, None, BINNED_MIN_POINTS, rms);
            (bx, by, Provenance::Computed)
        } else {
            binned.sort_by(|a, b| a.0.total_cmp(&b.0));
            let (bx, by) = binned.into_iter().unzip();
            (bx, by, Provenance::FromFile)
        };

        Ok(Self {
            names,
            pred_unc,
            y_diff,
            density,
            binned_x,
            binned_y,
            density_source,
            binned_source,
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// What had to be derived because the file did not carry it
    pub fn derived(&self) -> Vec<&'static str> {
        let mut notes = Vec::new();
        if self.density_source == Provenance::Computed {
            notes.push("density estimated with KDE");
        }
        if self.binned_source == Provenance::Computed {
            notes.push("binned RMS computed");
        }
        notes
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_points_and_binned_rows() {
        let csv = "\
galname,pred_unc,y_diff,density
G1,0.1,0.05,2.0
binned,0.2,0.1,
G2,0.3,-0.2,1.0
binned,0.1,0.08,
";
        let data = UncertaintyData::from_table(&Table::parse(csv, "u").unwrap(), "u").unwrap();
        assert_eq!(data.names, vec![EntityKey::from("G1"), EntityKey::from("G2")]);
        assert_eq!(data.density, vec![2.0, 1.0]);
        assert_eq!(data.density_source, Provenance::FromFile);
        // Sorted by x
        assert_eq!(data.binned_x, vec![0.1, 0.2]);
        assert_eq!(data.binned_y, vec![0.08, 0.1]);
        assert_eq!(data.binned_source, Provenance::FromFile);
        assert!(data.derived().is_empty());
    }

    #[test]
    fn computes_missing_density_and_curve() {
        let mut csv = String::from("galname,pred_unc,y_diff\n");
        for i in 0..50 {
            let x = 0.1 + i as f64 * 0.01;
            let y = if i % 2 == 0 { x } else { -x * 0.5 };
            csv.push_str(&format!("G{},{},{}\n", i, x, y));
        }
        let data = UncertaintyData::from_table(&Table::parse(&csv, "u").unwrap(), "u").unwrap();

        assert_eq!(data.len(), 50);
        assert_eq!(data.density.len(), 50);
        assert_eq!(data.density_source, Provenance::Computed);
        assert_eq!(data.binned_source, Provenance::Computed);
        assert_eq!(
            data.derived(),
            vec!["density estimated with KDE", "binned RMS computed"]
        );
        assert!(!data.binned_x.is_empty());
        assert!(data.binned_y.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn incomplete_rows_are_skipped() {
        let csv = "galname,pred_unc,y_diff,density\nG1,0.1,,1\nG2,0.2,0.1,1\n";
        let data = UncertaintyData::from_table(&Table::parse(csv, "u").unwrap(), "u").unwrap();
        assert_eq!(data.names, vec![EntityKey::from("G2")]);
    }

    #[test]
    fn only_binned_rows_is_empty() {
        let csv = "galname,pred_unc,y_diff\nbinned,0.1,0.1\n";
        let err = UncertaintyData::from_table(&Table::parse(csv, "u").unwrap(), "u").unwrap_err();
        assert!(matches!(err, DataError::Empty { .. }));
    }

    #[test]
    fn requires_core_columns() {
        let csv = "galname,pred_unc\nG1,0.1\n";
        let err = UncertaintyData::from_table(&Table::parse(csv, "u").unwrap(), "u").unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { .. }));
    }
}
