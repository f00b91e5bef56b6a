//! Predicted-vs-true cells derived from the SED table
//!
//! Each cell pairs the observed (`obs-<stem>`) and predicted (`pred-<stem>`)
//! values of one band or dust property. Only galaxies with both values are
//! kept, so each cell is its own filtered subset and row indices differ
//! between cells.

use super::sed::{SedCatalog, Simulation, FIR_BANDS};
use crate::analysis::FitMetrics;
use crate::selection::EntityKey;

/// Cells in the grid: six bands, then three properties
pub const GRID_CELLS: usize = 9;
pub const GRID_COLUMNS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct TvpCell {
    /// Band or property stem, e.g. `PACS_70` or `Mdust`
    pub stem: String,
    pub names: Vec<EntityKey>,
    pub truth: Vec<f64>,
    pub predicted: Vec<f64>,
    pub metrics: FitMetrics,
}

impl TvpCell {
    /// Collect the galaxies that have both an observed and a predicted value.
    ///
    /// `None` unless the table has both the `obs-` and the `pred-` column.
    pub fn build(catalog: &SedCatalog, stem: &str) -> Option<Self> {
        let table = catalog.table();
        let obs_col = Simulation::Obs.flux_column(stem);
        let pred_col = Simulation::Pred.flux_column(stem);
        if !table.has_column(&obs_col) || !table.has_column(&pred_col) {
            return None;
        }

        let mut cell = Self {
            stem: stem.to_string(),
            names: Vec::new(),
            truth: Vec::new(),
            predicted: Vec::new(),
            metrics: FitMetrics::default(),
        };
        for key in catalog.names() {
            let Some(row) = catalog.row(key) else { continue };
            if let (Some(t), Some(p)) = (table.number(row, &obs_col), table.number(row, &pred_col))
            {
                cell.names.push(key.clone());
                cell.truth.push(t);
                cell.predicted.push(p);
            }
        }
        cell.metrics = FitMetrics::compute(&cell.truth, &cell.predicted);
        Some(cell)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Build the 3×3 grid: FIR bands first, then up to three properties.
/// Slots without data are `None`.
pub fn build_grid(catalog: &SedCatalog, properties: &[String]) -> Vec<(String, Option<TvpCell>)> {
    let stems = FIR_BANDS
        .iter()
        .map(|b| b.to_string())
        .chain(properties.iter().take(GRID_CELLS - FIR_BANDS.len()).cloned());

    let mut grid: Vec<(String, Option<TvpCell>)> = stems
        .map(|stem| {
            let cell = TvpCell::build(catalog, &stem);
            if cell.is_none() {
                tracing::debug!("No obs/pred columns for '{}'", stem);
            }
            (stem, cell)
        })
        .collect();
    grid.resize(GRID_CELLS, (String::new(), None));
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Table;

    fn catalog() -> SedCatalog {
        let csv = "\
galname,obs-PACS_70,pred-PACS_70,obs-Mdust,pred-Mdust
B,1.0,1.5,7.0,7.1
A,2.0,2.0,,8.0
C,,3.0,6.0,6.0
";
        SedCatalog::from_table(Table::parse(csv, "seds").unwrap(), "seds").unwrap()
    }

    #[test]
    fn cell_keeps_complete_pairs_only() {
        let cell = TvpCell::build(&catalog(), "PACS_70").unwrap();
        assert_eq!(cell.names, vec![EntityKey::from("A"), EntityKey::from("B")]);
        assert_eq!(cell.truth, vec![2.0, 1.0]);
        assert_eq!(cell.predicted, vec![2.0, 1.5]);
        assert!(cell.metrics.rmse.is_some());
    }

    #[test]
    fn one_sided_columns_give_no_cell() {
        let csv = "\
galname,obs-PACS_70,pred-SPIRE_250
A,1.0,2.0
";
        let c = SedCatalog::from_table(Table::parse(csv, "seds").unwrap(), "seds").unwrap();
        assert!(TvpCell::build(&c, "PACS_70").is_none());
        assert!(TvpCell::build(&c, "SPIRE_250").is_none());
        assert!(TvpCell::build(&c, "Mdust").is_none());
    }

    #[test]
    fn same_galaxy_at_different_indices() {
        let c = catalog();
        let band = TvpCell::build(&c, "PACS_70").unwrap();
        let prop = TvpCell::build(&c, "Mdust").unwrap();
        let b = EntityKey::from("B");
        assert_eq!(band.names.iter().position(|k| *k == b), Some(1));
        assert_eq!(prop.names.iter().position(|k| *k == b), Some(0));
    }

    #[test]
    fn grid_has_nine_slots() {
        let grid = build_grid(&catalog(), &["Ldust".into(), "Mdust".into(), "Tdust".into()]);
        assert_eq!(grid.len(), GRID_CELLS);
        assert_eq!(grid[0].0, "PACS_70");
        assert!(grid[0].1.is_some());
        assert!(grid[1].1.is_none());
        assert_eq!(grid[6].0, "Ldust");
        assert!(grid[6].1.is_none());
        assert!(grid[7].1.is_some());
    }

    #[test]
    fn short_property_list_is_padded() {
        let grid = build_grid(&catalog(), &[]);
        assert_eq!(grid.len(), GRID_CELLS);
        assert!(grid[8].1.is_none());
    }
}
