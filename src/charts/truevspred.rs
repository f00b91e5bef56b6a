//! Predicted-vs-true grid
//!
//! Nine subplots, each with one entity-backed trace and a one-to-one line.
//! A galaxy appears once per cell it has data for, so selecting it lights
//! up a point in several traces at once.

use super::scatter::{ScatterView, TitleFormat};
use super::{Axis, ChartCanvas, Subplot, Trace};
use crate::analysis::gaussian_kde_2d;
use crate::data::truevspred::TvpCell;
use crate::palette::Rgb;
use crate::selection::style::ViewStyle;

pub const TITLE: &str = "Predicted vs True";

/// Build the grid view from the output of `build_grid`
pub fn build(grid: &[(String, Option<TvpCell>)], style: &ViewStyle) -> ScatterView {
    let mut canvas = ChartCanvas::new(
        TITLE,
        Axis {
            label: "True".into(),
            log: false,
        },
        Axis {
            label: "Predicted".into(),
            log: false,
        },
    );

    let mut bindings = Vec::new();
    for (index, (stem, cell)) in grid.iter().enumerate() {
        let Some(cell) = cell.as_ref().filter(|c| !c.is_empty()) else {
            canvas.subplots.push(Subplot {
                title: stem.clone(),
                annotations: vec!["no data".into()],
            });
            continue;
        };

        canvas.subplots.push(Subplot {
            title: stem.clone(),
            annotations: cell.metrics.lines(),
        });

        let defaults = style.defaults_for(&gaussian_kde_2d(&cell.truth, &cell.predicted));
        let trace = canvas.add_trace(
            Trace::markers(
                stem.clone(),
                cell.truth.clone(),
                cell.predicted.clone(),
                cell.names.clone(),
                defaults.clone(),
            )
            .on_subplot(index)
            .hidden_from_legend(),
        );
        bindings.push((trace, cell.names.clone(), defaults));

        let (lo, hi) = span(&cell.truth, &cell.predicted);
        canvas.add_trace(
            Trace::line("one-to-one", vec![lo, hi], vec![lo, hi], Rgb::BLACK)
                .on_subplot(index)
                .hidden_from_legend(),
        );
    }

    let mut view = ScatterView::new(
        "truevspred",
        canvas,
        style.highlight,
        TitleFormat::new(TITLE, "Predicted vs True — {name}"),
    );
    for (trace, keys, defaults) in bindings {
        view.bind_trace(trace, keys, defaults);
    }
    view
}

/// Common range of both axes
fn span(a: &[f64], b: &[f64]) -> (f64, f64) {
    a.iter()
        .chain(b)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
