//! Chart models and the render-target seam
//!
//! A `ChartCanvas` is the in-memory figure a view draws into: a title, a set
//! of traces and per-subplot annotations. The TUI reads canvases every frame;
//! views only ever write to them through the `RenderTarget` operations.
//!
//! ```text
//! SelectionCoordinator ──select──▶ SelectionView ──restyle/relayout──▶ ChartCanvas ──▶ TUI
//! ```

pub mod scatter;
pub mod sed;
pub mod truevspred;
pub mod uncertainty;

use crate::palette::Rgb;
use crate::selection::style::StyleChannels;
use crate::selection::EntityKey;

/// Index of a trace within its canvas
pub type TraceId = usize;

/// How a trace is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceMode {
    Markers,
    Lines,
    MarkersLines,
    /// Vertical error bars only (zero-size markers)
    ErrorBars,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerShape {
    #[default]
    Dot,
    Square,
}

/// One data series
#[derive(Debug, Clone)]
pub struct Trace {
    pub name: String,
    pub mode: TraceMode,
    pub shape: MarkerShape,
    /// Subplot this trace belongs to (0 for single-axis charts)
    pub subplot: usize,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Symmetric y errors, one per point
    pub error_y: Option<Vec<f64>>,
    /// Hover text: the entity behind each point (empty for reference lines)
    pub keys: Vec<EntityKey>,
    pub marker: StyleChannels,
    pub line_color: Rgb,
    pub show_legend: bool,
}

impl Trace {
    /// A reference line with no entities behind it
    pub fn line(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>, color: Rgb) -> Self {
        Self {
            name: name.into(),
            mode: TraceMode::Lines,
            shape: MarkerShape::Dot,
            subplot: 0,
            x,
            y,
            error_y: None,
            keys: Vec::new(),
            marker: StyleChannels::default(),
            line_color: color,
            show_legend: true,
        }
    }

    /// Entity-backed scatter markers
    pub fn markers(
        name: impl Into<String>,
        x: Vec<f64>,
        y: Vec<f64>,
        keys: Vec<EntityKey>,
        marker: StyleChannels,
    ) -> Self {
        Self {
            name: name.into(),
            mode: TraceMode::Markers,
            shape: MarkerShape::Dot,
            subplot: 0,
            x,
            y,
            error_y: None,
            keys,
            marker,
            line_color: Rgb::BLACK,
            show_legend: true,
        }
    }

    pub fn on_subplot(mut self, subplot: usize) -> Self {
        self.subplot = subplot;
        self
    }

    pub fn hidden_from_legend(mut self) -> Self {
        self.show_legend = false;
        self
    }

    /// Number of plottable points
    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-subplot labels (cell title plus metric lines)
#[derive(Debug, Clone, Default)]
pub struct Subplot {
    pub title: String,
    pub annotations: Vec<String>,
}

/// Axis description
#[derive(Debug, Clone, Default)]
pub struct Axis {
    pub label: String,
    pub log: bool,
}

/// Partial update of a trace. Only `Some` channels are touched.
#[derive(Debug, Clone, Default)]
pub struct Restyle {
    pub marker: Option<StyleChannels>,
    pub x: Option<Vec<f64>>,
    pub y: Option<Vec<f64>>,
    pub error_y: Option<Vec<f64>>,
}

impl Restyle {
    /// Restyle the color, opacity and size channels only
    pub fn marker(channels: StyleChannels) -> Self {
        Self {
            marker: Some(channels),
            ..Default::default()
        }
    }

    /// Replace the point positions of a trace, keeping its error bars
    pub fn points(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// Replace the data arrays of a trace
    pub fn data(x: Vec<f64>, y: Vec<f64>, error_y: Vec<f64>) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            error_y: Some(error_y),
            ..Default::default()
        }
    }
}

/// What a view needs from whatever draws it.
///
/// Targets never report state back; views re-derive everything from their
/// own defaults.
pub trait RenderTarget {
    /// Apply `update` to each listed trace without touching anything else
    fn restyle(&mut self, traces: &[TraceId], update: &Restyle);

    /// Replace the figure title
    fn relayout_title(&mut self, title: &str);
}

/// In-memory figure
#[derive(Debug, Clone, Default)]
pub struct ChartCanvas {
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub traces: Vec<Trace>,
    /// Empty for single-axis charts
    pub subplots: Vec<Subplot>,
}

impl ChartCanvas {
    pub fn new(title: impl Into<String>, x_axis: Axis, y_axis: Axis) -> Self {
        Self {
            title: title.into(),
            x_axis,
            y_axis,
            ..Default::default()
        }
    }

    /// Append a trace and return its id
    pub fn add_trace(&mut self, trace: Trace) -> TraceId {
        self.traces.push(trace);
        self.traces.len() - 1
    }

    #[cfg(test)]
    pub fn trace(&self, id: TraceId) -> Option<&Trace> {
        self.traces.get(id)
    }

    /// Traces drawn on a given subplot, with their ids
    pub fn traces_on(&self, subplot: usize) -> impl Iterator<Item = (TraceId, &Trace)> {
        self.traces
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.subplot == subplot)
    }
}

impl RenderTarget for ChartCanvas {
    fn restyle(&mut self, traces: &[TraceId], update: &Restyle) {
        for &id in traces {
            let Some(trace) = self.traces.get_mut(id) else {
                tracing::warn!("restyle of unknown trace {} on '{}'", id, self.title);
                continue;
            };
            if let Some(marker) = &update.marker {
                trace.marker = marker.clone();
            }
            if let Some(x) = &update.x {
                trace.x = x.clone();
            }
            if let Some(y) = &update.y {
                trace.y = y.clone();
            }
            if let Some(err) = &update.error_y {
                trace.error_y = Some(err.clone());
            }
        }
    }

    fn relayout_title(&mut self, title: &str) {
        self.title = title.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> ChartCanvas {
        let mut canvas = ChartCanvas::new("t", Axis::default(), Axis::default());
        canvas.add_trace(Trace::markers(
            "points",
            vec![1.0, 2.0],
            vec![3.0, 4.0],
            vec!["A".into(), "B".into()],
            StyleChannels::uniform(vec![Rgb::BLACK; 2], 0.3, 6.0),
        ));
        canvas.add_trace(Trace::line("ref", vec![0.0, 1.0], vec![0.0, 1.0], Rgb::BLACK));
        canvas
    }

    #[test]
    fn marker_restyle_leaves_data_alone() {
        let mut c = canvas();
        let channels = StyleChannels::uniform(vec![Rgb(9, 9, 9); 2], 1.0, 8.0);
        c.restyle(&[0], &Restyle::marker(channels.clone()));

        let t = c.trace(0).unwrap();
        assert_eq!(t.marker, channels);
        assert_eq!(t.x, vec![1.0, 2.0]);
        assert_eq!(t.y, vec![3.0, 4.0]);
        assert_eq!(c.trace(1).unwrap().x, vec![0.0, 1.0]);
    }

    #[test]
    fn unknown_trace_is_ignored() {
        let mut c = canvas();
        c.restyle(&[7], &Restyle::data(vec![], vec![], vec![]));
        assert_eq!(c.traces.len(), 2);
    }

    #[test]
    fn relayout_title_only_changes_title() {
        let mut c = canvas();
        c.relayout_title("Selected A");
        assert_eq!(c.title, "Selected A");
        assert_eq!(c.traces[0].x, vec![1.0, 2.0]);
    }
}
