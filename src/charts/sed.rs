//! SED chart
//!
//! Unlike the scatter views, the SED chart shows one galaxy at a time: a
//! selection swaps the data of all eight traces rather than restyling
//! markers. Traces 0-3 carry the error bars of each simulation and traces
//! 4-7 the fluxes.

use super::{Axis, ChartCanvas, MarkerShape, Restyle, RenderTarget, Trace, TraceId, TraceMode};
use crate::data::sed::{SedCatalog, Simulation};
use crate::selection::style::StyleChannels;
use crate::selection::{EntityKey, SelectionView};
use std::sync::Arc;

const ERROR_TRACES: [TraceId; 4] = [0, 1, 2, 3];
const FLUX_TRACES: [TraceId; 4] = [4, 5, 6, 7];

pub struct SedView {
    catalog: Arc<SedCatalog>,
    canvas: ChartCanvas,
}

impl SedView {
    pub fn new(catalog: Arc<SedCatalog>) -> Self {
        let mut canvas = ChartCanvas::new(
            "SED",
            Axis {
                label: "Wavelength (µm)".into(),
                log: true,
            },
            Axis {
                label: "log(Lν / (W/Hz))".into(),
                log: false,
            },
        );
        for sim in Simulation::ALL {
            canvas.add_trace(error_trace(sim));
        }
        for sim in Simulation::ALL {
            canvas.add_trace(flux_trace(sim));
        }
        Self { catalog, canvas }
    }
}

fn error_trace(sim: Simulation) -> Trace {
    Trace {
        name: "uncertainties".into(),
        mode: TraceMode::ErrorBars,
        shape: MarkerShape::Dot,
        subplot: 0,
        x: Vec::new(),
        y: Vec::new(),
        error_y: Some(Vec::new()),
        keys: Vec::new(),
        marker: StyleChannels::default(),
        line_color: sim.color(),
        show_legend: sim == Simulation::Full,
    }
}

fn flux_trace(sim: Simulation) -> Trace {
    let (mode, shape) = match sim {
        Simulation::Obs => (TraceMode::Markers, MarkerShape::Square),
        _ => (TraceMode::MarkersLines, MarkerShape::Dot),
    };
    Trace {
        name: sim.prefix().into(),
        mode,
        shape,
        subplot: 0,
        x: Vec::new(),
        y: Vec::new(),
        error_y: None,
        keys: Vec::new(),
        marker: StyleChannels::default(),
        line_color: sim.color(),
        show_legend: true,
    }
}

impl SelectionView for SedView {
    fn name(&self) -> &str {
        "sed"
    }

    fn on_select(&mut self, key: &EntityKey) -> usize {
        let mut points = 0;
        if !self.catalog.contains(key) {
            tracing::debug!("No SED for {}, clearing chart", key);
        }
        for (i, sim) in Simulation::ALL.into_iter().enumerate() {
            let series = self.catalog.series(key, sim).unwrap_or_default();
            points += series.len();
            // Error bars live on their own trace only
            self.canvas.restyle(
                &[FLUX_TRACES[i]],
                &Restyle::points(series.wavelengths.clone(), series.fluxes.clone()),
            );
            self.canvas.restyle(
                &[ERROR_TRACES[i]],
                &Restyle::data(series.wavelengths, series.fluxes, series.errors),
            );
        }
        self.canvas.relayout_title(&format!("SED of {}", key));
        points
    }

    fn canvas(&self) -> &ChartCanvas {
        &self.canvas
    }
}
