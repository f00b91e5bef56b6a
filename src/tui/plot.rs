//! Data-to-screen mapping for chart panes
//!
//! A `PlotFrame` is fixed at draw time from the traces of one subplot and
//! the screen rectangle they were drawn into. Mouse clicks are resolved
//! against the same frames, so a click lands on exactly what was drawn.

use crate::charts::ChartCanvas;
use crate::selection::EntityKey;
use ratatui::layout::{Position, Rect};

/// Click radius in cells, measured with rows counted double
pub const HIT_RADIUS: f64 = 2.0;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;

/// Fraction of the data range added on each side
const PADDING: f64 = 0.05;

/// Plot bounds in transformed space (log10 for log axes)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotFrame {
    pub area: Rect,
    pub subplot: usize,
    pub bounds: Bounds,
    pub x_log: bool,
    pub y_log: bool,
}

fn transform(v: f64, log: bool) -> Option<f64> {
    match (log, v.is_finite()) {
        (_, false) => None,
        (true, _) if v <= 0.0 => None,
        (true, _) => Some(v.log10()),
        (false, _) => Some(v),
    }
}

/// Pad a range, widening it when every value is the same
fn padded(lo: f64, hi: f64) -> [f64; 2] {
    let span = hi - lo;
    if span <= f64::EPSILON * lo.abs().max(1.0) {
        let half = (lo.abs() * 0.1).max(0.5);
        return [lo - half, hi + half];
    }
    [lo - span * PADDING, hi + span * PADDING]
}

impl PlotFrame {
    /// Fit bounds around every point (and error bar) on `subplot`.
    ///
    /// Returns `None` when the subplot has nothing plottable.
    pub fn fit(canvas: &ChartCanvas, subplot: usize, area: Rect) -> Option<Self> {
        let x_log = canvas.x_axis.log;
        let y_log = canvas.y_axis.log;

        let mut x_range = (f64::INFINITY, f64::NEG_INFINITY);
        let mut y_range = (f64::INFINITY, f64::NEG_INFINITY);

        for (_, trace) in canvas.traces_on(subplot) {
            for i in 0..trace.len() {
                let Some(x) = transform(trace.x[i], x_log) else {
                    continue;
                };
                let err = trace
                    .error_y
                    .as_ref()
                    .and_then(|e| e.get(i))
                    .copied()
                    .filter(|e| e.is_finite())
                    .unwrap_or(0.0)
                    .abs();
                let ys = [trace.y[i] - err, trace.y[i] + err];
                let ys: Vec<f64> = ys.iter().filter_map(|&y| transform(y, y_log)).collect();
                if ys.is_empty() {
                    continue;
                }
                x_range = (x_range.0.min(x), x_range.1.max(x));
                for y in ys {
                    y_range = (y_range.0.min(y), y_range.1.max(y));
                }
            }
        }

        if !x_range.0.is_finite() || !y_range.0.is_finite() {
            return None;
        }

        Some(Self {
            area,
            subplot,
            bounds: Bounds {
                x: padded(x_range.0, x_range.1),
                y: padded(y_range.0, y_range.1),
            },
            x_log,
            y_log,
        })
    }

    /// Data point in plot space, or `None` if it cannot be drawn
    pub fn project(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        Some((transform(x, self.x_log)?, transform(y, self.y_log)?))
    }

    /// Fractional cell position of a data point
    pub fn to_screen(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let (px, py) = self.project(x, y)?;
        let [x0, x1] = self.bounds.x;
        let [y0, y1] = self.bounds.y;
        let w = f64::from(self.area.width.saturating_sub(1));
        let h = f64::from(self.area.height.saturating_sub(1));

        let col = f64::from(self.area.x) + (px - x0) / (x1 - x0) * w;
        // Screen rows grow downwards
        let row = f64::from(self.area.y) + (y1 - py) / (y1 - y0) * h;
        Some((col, row))
    }

    /// Inverse of `project` for axis labels
    pub fn untransform_x(&self, v: f64) -> f64 {
        if self.x_log {
            10f64.powf(v)
        } else {
            v
        }
    }

    pub fn untransform_y(&self, v: f64) -> f64 {
        if self.y_log {
            10f64.powf(v)
        } else {
            v
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.contains(Position::new(column, row))
    }

    /// Galaxy under a click, if any entity-backed point is within
    /// `HIT_RADIUS`. Reference lines carry no keys and are never hit.
    pub fn hit_test(&self, canvas: &ChartCanvas, column: u16, row: u16) -> Option<EntityKey> {
        if !self.contains(column, row) {
            return None;
        }
        let (cx, cy) = (f64::from(column), f64::from(row));

        let mut best: Option<(f64, &EntityKey)> = None;
        for (_, trace) in canvas.traces_on(self.subplot) {
            for (i, key) in trace.keys.iter().enumerate().take(trace.len()) {
                let Some((sx, sy)) = self.to_screen(trace.x[i], trace.y[i]) else {
                    continue;
                };
                let dist = ((sx - cx).powi(2) + ((sy - cy) * CELL_ASPECT).powi(2)).sqrt();
                if dist <= HIT_RADIUS && best.map_or(true, |(d, _)| dist < d) {
                    best = Some((dist, key));
                }
            }
        }
        best.map(|(_, key)| key.clone())
    }
}

/// Short tick label
pub fn format_tick(v: f64) -> String {
    let a = v.abs();
    if a != 0.0 && !(1e-2..1e4).contains(&a) {
        format!("{:.0e}", v)
    } else if a >= 100.0 {
        format!("{:.0}", v)
    } else {
        format!("{:.2}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{Axis, Trace};
    use crate::palette::Rgb;
    use crate::selection::style::StyleChannels;

    fn canvas(log_x: bool) -> ChartCanvas {
        let mut c = ChartCanvas::new(
            "t",
            Axis {
                label: "x".into(),
                log: log_x,
            },
            Axis::default(),
        );
        c.add_trace(Trace::markers(
            "points",
            vec![1.0, 10.0, 100.0],
            vec![0.0, 1.0, 2.0],
            vec!["A".into(), "B".into(), "C".into()],
            StyleChannels::uniform(vec![Rgb::BLACK; 3], 0.3, 6.0),
        ));
        c
    }

    #[test]
    fn maps_through_log_axis() {
        let c = canvas(true);
        let frame = PlotFrame::fit(&c, 0, Rect::new(10, 5, 41, 21)).unwrap();
        // Log axis: 1, 10, 100 become 0, 1, 2
        assert!((frame.bounds.x[0] + 0.1).abs() < 1e-9);
        assert!((frame.bounds.x[1] - 2.1).abs() < 1e-9);

        let (col, row) = frame.to_screen(10.0, 1.0).unwrap();
        assert!((col - 30.0).abs() < 1e-9);
        assert!((row - 15.0).abs() < 1e-9);
    }

    #[test]
    fn log_axis_drops_non_positive() {
        let mut c = canvas(true);
        c.traces[0].x[0] = 0.0;
        let frame = PlotFrame::fit(&c, 0, Rect::new(0, 0, 40, 20)).unwrap();
        assert!(frame.to_screen(0.0, 0.0).is_none());
        assert!(frame.bounds.x[0] > 0.0);
    }

    #[test]
    fn hit_test_finds_nearest_point() {
        let c = canvas(true);
        let frame = PlotFrame::fit(&c, 0, Rect::new(0, 0, 41, 21)).unwrap();
        let (col, row) = frame.to_screen(10.0, 1.0).unwrap();

        let hit = frame.hit_test(&c, col as u16 + 1, row as u16);
        assert_eq!(hit, Some("B".into()));

        // Far from every point
        assert_eq!(frame.hit_test(&c, 40, 20), None);
        // Outside the frame
        assert_eq!(frame.hit_test(&c, 100, 100), None);
    }

    #[test]
    fn reference_lines_are_not_clickable() {
        let mut c = ChartCanvas::new("t", Axis::default(), Axis::default());
        c.add_trace(Trace::line("1:1", vec![0.0, 1.0], vec![0.0, 1.0], Rgb::BLACK));
        let frame = PlotFrame::fit(&c, 0, Rect::new(0, 0, 20, 10)).unwrap();
        let (col, row) = frame.to_screen(0.5, 0.5).unwrap();
        assert_eq!(frame.hit_test(&c, col as u16, row as u16), None);
    }

    #[test]
    fn error_bars_widen_y_bounds() {
        let mut c = canvas(false);
        c.traces[0].error_y = Some(vec![0.0, 0.0, 8.0]);
        let frame = PlotFrame::fit(&c, 0, Rect::new(0, 0, 20, 10)).unwrap();
        assert!(frame.bounds.y[1] > 10.0);
        assert!(frame.bounds.y[0] < -6.0);
    }

    #[test]
    fn empty_subplot_has_no_frame() {
        let c = ChartCanvas::new("t", Axis::default(), Axis::default());
        assert!(PlotFrame::fit(&c, 0, Rect::new(0, 0, 20, 10)).is_none());
    }

    #[test]
    fn single_value_range_is_widened() {
        assert_eq!(padded(2.0, 2.0), [1.5, 2.5]);
        assert_eq!(padded(100.0, 100.0), [90.0, 110.0]);
    }

    #[test]
    fn tick_labels() {
        assert_eq!(format_tick(0.0), "0.00");
        assert_eq!(format_tick(1.234), "1.23");
        assert_eq!(format_tick(250.0), "250");
        assert_eq!(format_tick(50000.0), "5e4");
    }
}
