//! Dataset loading and view wiring
//!
//! `Explorer` is built once at startup. It owns the coordinator and the
//! handles of the three views, and it is the only thing the TUI and the
//! headless commands talk to.

use crate::charts::{sed::SedView, truevspred, uncertainty};
use crate::config::DataConfig;
use crate::data::sed::SedCatalog;
use crate::data::truevspred::build_grid;
use crate::data::uncertainty::UncertaintyData;
use crate::data::DataSource;
use crate::selection::style::ViewStyle;
use crate::selection::{EntityKey, SelectionCoordinator, SelectionReport, SelectionView, ViewHandle};
use anyhow::{Context, Result};
use regex::RegexBuilder;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Outcome of loading one dataset, for the startup banner
#[derive(Debug, Clone)]
pub struct LoadStatus {
    pub name: &'static str,
    pub source: String,
    pub result: Result<usize, String>,
    /// Parts of the dataset derived at load time
    pub notes: Vec<&'static str>,
}

/// Everything read from disk or the network at startup
pub struct Datasets {
    pub sed: Arc<SedCatalog>,
    pub uncertainty: Option<UncertaintyData>,
    pub status: Vec<LoadStatus>,
}

impl Datasets {
    /// Load both tables concurrently.
    ///
    /// The SED table is required. A failing uncertainty table is logged and
    /// leaves its tab empty.
    pub async fn load(config: &DataConfig) -> Result<Self> {
        let sed_source = DataSource::parse(&config.sed_source);
        let unc_source = DataSource::parse(&config.uncertainty_source);

        let (sed_table, unc_table) = tokio::join!(sed_source.load(), unc_source.load());

        let sed_origin = sed_source.to_string();
        let sed = sed_table
            .and_then(|t| SedCatalog::from_table(t, &sed_origin))
            .with_context(|| format!("Failed to load SED table from {}", sed_origin))?;

        let unc_origin = unc_source.to_string();
        let uncertainty =
            unc_table.and_then(|t| UncertaintyData::from_table(&t, &unc_origin));

        let status = vec![
            LoadStatus {
                name: "seds",
                source: sed_origin,
                result: Ok(sed.names().len()),
                notes: Vec::new(),
            },
            LoadStatus {
                name: "uncertainty",
                source: unc_origin,
                result: match &uncertainty {
                    Ok(data) => Ok(data.len()),
                    Err(e) => Err(e.to_string()),
                },
                notes: uncertainty.as_ref().map(|d| d.derived()).unwrap_or_default(),
            },
        ];

        let uncertainty = match uncertainty {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!("Uncertainty view unavailable: {}", e);
                None
            }
        };

        Ok(Self {
            sed: Arc::new(sed),
            uncertainty,
            status,
        })
    }
}

/// The tabbed views beside the SED chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    TrueVsPred,
    Uncertainty,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::TrueVsPred, Tab::Uncertainty];

    pub fn title(self) -> &'static str {
        match self {
            Tab::TrueVsPred => "Predicted vs True",
            Tab::Uncertainty => "Uncertainty",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::TrueVsPred => Tab::Uncertainty,
            Tab::Uncertainty => Tab::TrueVsPred,
        }
    }
}

pub struct Explorer {
    coordinator: SelectionCoordinator,
    sed: ViewHandle,
    tvp: ViewHandle,
    uncertainty: Option<ViewHandle>,
    /// Sorted union of every galaxy across views
    names: Vec<EntityKey>,
}

impl Explorer {
    /// Build the views and register them. `initial` is applied to every
    /// view as it registers.
    pub fn new(
        datasets: &Datasets,
        style: &ViewStyle,
        properties: &[String],
        initial: Option<EntityKey>,
    ) -> Self {
        let mut coordinator = SelectionCoordinator::new(initial);

        let grid = build_grid(&datasets.sed, properties);
        let tvp = coordinator.register_view(truevspred::build(&grid, style));
        let uncertainty = datasets
            .uncertainty
            .as_ref()
            .map(|data| coordinator.register_view(uncertainty::build(data, style)));
        let sed = coordinator.register_view(SedView::new(datasets.sed.clone()));

        let mut names: BTreeSet<EntityKey> = datasets.sed.names().iter().cloned().collect();
        if let Some(data) = &datasets.uncertainty {
            names.extend(data.names.iter().cloned());
        }

        tracing::info!(
            "Explorer ready: {} galaxies, {} view(s)",
            names.len(),
            coordinator.view_count()
        );

        Self {
            coordinator,
            sed,
            tvp,
            uncertainty,
            names: names.into_iter().collect(),
        }
    }

    pub fn coordinator_mut(&mut self) -> &mut SelectionCoordinator {
        &mut self.coordinator
    }

    pub fn select(&mut self, key: impl Into<EntityKey>) -> SelectionReport {
        self.coordinator.select(key)
    }

    pub fn selected(&self) -> Option<&EntityKey> {
        self.coordinator.selected()
    }

    pub fn names(&self) -> &[EntityKey] {
        &self.names
    }

    pub fn sed_view(&self) -> Option<&dyn SelectionView> {
        self.coordinator.view(self.sed)
    }

    /// View shown under a tab; `None` when its dataset failed to load
    pub fn tab_view(&self, tab: Tab) -> Option<&dyn SelectionView> {
        let handle = match tab {
            Tab::TrueVsPred => Some(self.tvp),
            Tab::Uncertainty => self.uncertainty,
        }?;
        self.coordinator.view(handle)
    }

    /// Neighbour of the current selection in name order, wrapping around.
    /// `step` is +1 or -1.
    pub fn neighbour(&self, step: isize) -> Option<EntityKey> {
        if self.names.is_empty() {
            return None;
        }
        let n = self.names.len() as isize;
        let pos = match self.selected().and_then(|k| self.names.binary_search(k).ok()) {
            Some(i) => (i as isize + step).rem_euclid(n),
            None if step >= 0 => 0,
            None => n - 1,
        };
        self.names.get(pos as usize).cloned()
    }

    /// First galaxy matching `query` as a case-insensitive regex, or as a
    /// plain substring when the regex does not compile
    pub fn search(&self, query: &str) -> Option<EntityKey> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        match RegexBuilder::new(query).case_insensitive(true).build() {
            Ok(re) => self.names.iter().find(|k| re.is_match(k.as_str())).cloned(),
            Err(_) => {
                let needle = query.to_lowercase();
                self.names
                    .iter()
                    .find(|k| k.as_str().to_lowercase().contains(&needle))
                    .cloned()
            }
        }
    }
}
