//! Chart pane rendering
//!
//! Draws a `ChartCanvas` with a ratatui `Canvas` widget. Background points
//! are braille dots, dimmed by their opacity. Points with opacity of at
//! least one half (the selected galaxy, SED fluxes) are drawn as glyphs on
//! a second layer so they stay on top, the selected galaxy last of all.
//! Every plotted area is returned as a `PlotFrame` for hit-testing.

use crate::charts::{ChartCanvas, MarkerShape, Trace, TraceMode};
use crate::data::truevspred::GRID_COLUMNS;
use crate::palette::Rgb;
use crate::selection::EntityKey;
use crate::tui::layout::{grid_cells, Breakpoint};
use crate::tui::plot::{format_tick, PlotFrame};
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Block, Borders, Clear, Paragraph,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Columns reserved for y tick labels
const Y_TICK_WIDTH: u16 = 7;

/// Opacity at or above which a marker is drawn as a glyph
const OPAQUE: f64 = 0.5;

/// Translucent markers are pulled toward this gray
const DIM_TARGET: Rgb = Rgb(0x80, 0x80, 0x80);

/// Black reference lines would vanish on dark backgrounds
fn trace_color(rgb: Rgb, theme: &Theme) -> Color {
    if rgb == Rgb::BLACK {
        theme.axis
    } else {
        rgb.into()
    }
}

/// Color and opacity of point `i`; traces without per-row styling use
/// their line color at full opacity
fn point_style(trace: &Trace, i: usize, theme: &Theme) -> (Color, f64) {
    match trace.marker.get(i) {
        Some(style) if style.opacity < OPAQUE => (
            trace_color(style.color.lerp(DIM_TARGET, 0.5 - style.opacity), theme),
            style.opacity,
        ),
        Some(style) => (trace_color(style.color, theme), style.opacity),
        None => (trace_color(trace.line_color, theme), 1.0),
    }
}

fn glyph(shape: MarkerShape) -> &'static str {
    match shape {
        MarkerShape::Dot => "●",
        MarkerShape::Square => "■",
    }
}

/// What a chart pane is drawn from
#[derive(Clone, Copy)]
pub struct ChartContext<'a> {
    pub canvas: &'a ChartCanvas,
    pub theme: &'a Theme,
    /// Printed after every other glyph so it is never covered
    pub selected: Option<&'a EntityKey>,
}

/// Render a chart pane and return the frames of its plot areas
pub fn render(f: &mut Frame, area: Rect, chart: &ChartContext, focused: bool) -> Vec<PlotFrame> {
    let (canvas, theme) = (chart.canvas, chart.theme);
    let border = if focused {
        theme.border_focused
    } else {
        theme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {} ", canvas.title),
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let bp = Breakpoint::from_width(area.width);

    if canvas.subplots.is_empty() {
        return render_plot(f, inner, chart, 0, bp.shows_legend(), true)
            .into_iter()
            .collect();
    }

    grid_cells(inner, canvas.subplots.len(), GRID_COLUMNS)
        .into_iter()
        .enumerate()
        .filter_map(|(i, cell)| render_subplot(f, cell, chart, i))
        .collect()
}

/// One grid cell: a title row, then the plot with its annotations
fn render_subplot(
    f: &mut Frame,
    cell: Rect,
    chart: &ChartContext,
    index: usize,
) -> Option<PlotFrame> {
    let (canvas, theme) = (chart.canvas, chart.theme);
    let subplot = canvas.subplots.get(index)?;
    if cell.height < 2 {
        return None;
    }

    let title_area = Rect::new(cell.x, cell.y, cell.width, 1);
    f.render_widget(
        Paragraph::new(subplot.title.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.title)),
        title_area,
    );

    let body = Rect::new(cell.x, cell.y + 1, cell.width, cell.height - 1);
    let frame = render_plot(f, body, chart, index, false, false);

    // Metric lines sit in the top-left corner of the plot
    if let Some(frame) = &frame {
        let lines: Vec<Line> = subplot
            .annotations
            .iter()
            .map(|a| Line::styled(a.clone(), Style::default().fg(theme.muted)))
            .collect();
        let height = (lines.len() as u16).min(frame.area.height);
        let width = subplot
            .annotations
            .iter()
            .map(|a| a.width() as u16)
            .max()
            .unwrap_or(0)
            .min(frame.area.width);
        f.render_widget(
            Paragraph::new(lines),
            Rect::new(frame.area.x, frame.area.y, width, height),
        );
    } else if let Some(note) = subplot.annotations.first() {
        render_empty(f, body, note, theme);
    }

    frame
}

fn render_empty(f: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    if area.height == 0 {
        return;
    }
    let y = area.y + area.height / 2;
    f.render_widget(
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.muted)),
        Rect::new(area.x, y, area.width, 1),
    );
}

/// Axes, ticks, data and optional legend for one subplot
fn render_plot(
    f: &mut Frame,
    area: Rect,
    chart: &ChartContext,
    subplot: usize,
    legend: bool,
    axis_titles: bool,
) -> Option<PlotFrame> {
    let (canvas, theme) = (chart.canvas, chart.theme);
    // Top row: y axis title. Bottom rows: x ticks (and x axis title).
    let top = u16::from(axis_titles);
    let bottom = 1 + u16::from(axis_titles);
    if area.width <= Y_TICK_WIDTH + 4 || area.height <= top + bottom + 2 {
        render_empty(f, area, "too small", theme);
        return None;
    }

    let plot_area = Rect::new(
        area.x + Y_TICK_WIDTH,
        area.y + top,
        area.width - Y_TICK_WIDTH,
        area.height - top - bottom,
    );

    let Some(frame) = PlotFrame::fit(canvas, subplot, plot_area) else {
        render_empty(f, area, "no data", theme);
        return None;
    };

    render_canvas(f, &frame, chart);
    render_ticks(f, &frame, theme);

    if axis_titles {
        let label_style = Style::default().fg(theme.muted);
        f.render_widget(
            Paragraph::new(canvas.y_axis.label.as_str()).style(label_style),
            Rect::new(area.x, area.y, area.width, 1),
        );
        f.render_widget(
            Paragraph::new(canvas.x_axis.label.as_str())
                .alignment(Alignment::Center)
                .style(label_style),
            Rect::new(plot_area.x, area.bottom() - 1, plot_area.width, 1),
        );
    }

    if legend {
        render_legend(f, &frame, canvas, theme);
    }

    Some(frame)
}

fn render_canvas(f: &mut Frame, frame: &PlotFrame, chart: &ChartContext) {
    let (canvas, theme) = (chart.canvas, chart.theme);
    let subplot = frame.subplot;

    let widget = Canvas::default()
        .marker(Marker::Braille)
        .background_color(theme.bg)
        .x_bounds(frame.bounds.x)
        .y_bounds(frame.bounds.y)
        .paint(|ctx| {
            for (_, trace) in canvas.traces_on(subplot) {
                let projected: Vec<Option<(f64, f64)>> = (0..trace.len())
                    .map(|i| frame.project(trace.x[i], trace.y[i]))
                    .collect();

                if matches!(trace.mode, TraceMode::Lines | TraceMode::MarkersLines) {
                    let color = trace_color(trace.line_color, theme);
                    for pair in projected.windows(2) {
                        if let [Some((x1, y1)), Some((x2, y2))] = pair {
                            ctx.draw(&CanvasLine {
                                x1: *x1,
                                y1: *y1,
                                x2: *x2,
                                y2: *y2,
                                color,
                            });
                        }
                    }
                }

                if let Some(errors) = &trace.error_y {
                    let color = trace_color(trace.line_color, theme);
                    for (i, err) in errors.iter().enumerate().take(trace.len()) {
                        if !(err.is_finite() && *err > 0.0) {
                            continue;
                        }
                        let lo = frame.project(trace.x[i], trace.y[i] - err);
                        let hi = frame.project(trace.x[i], trace.y[i] + err);
                        if let (Some((x, y1)), Some((_, y2))) = (lo, hi) {
                            ctx.draw(&CanvasLine {
                                x1: x,
                                y1,
                                x2: x,
                                y2,
                                color,
                            });
                        }
                    }
                }

                if matches!(trace.mode, TraceMode::Markers | TraceMode::MarkersLines) {
                    for (i, point) in projected.iter().enumerate() {
                        let Some(point) = point else { continue };
                        let (color, opacity) = point_style(trace, i, theme);
                        if opacity < OPAQUE {
                            ctx.draw(&Points {
                                coords: &[*point],
                                color,
                            });
                        }
                    }
                }
            }

            // Opaque markers on their own layer so nothing covers them.
            // Labels print in call order, so the selection goes last.
            ctx.layer();
            let mut glyphs: Vec<(bool, f64, f64, Span)> = Vec::new();
            for (_, trace) in canvas.traces_on(subplot) {
                if !matches!(trace.mode, TraceMode::Markers | TraceMode::MarkersLines) {
                    continue;
                }
                for i in 0..trace.len() {
                    let Some((x, y)) = frame.project(trace.x[i], trace.y[i]) else {
                        continue;
                    };
                    let (color, opacity) = point_style(trace, i, theme);
                    if opacity >= OPAQUE {
                        let selected = chart.selected.is_some_and(|k| trace.keys.get(i) == Some(k));
                        let span = Span::styled(
                            glyph(trace.shape),
                            Style::default().fg(color).add_modifier(Modifier::BOLD),
                        );
                        glyphs.push((selected, x, y, span));
                    }
                }
            }
            glyphs.sort_by_key(|(selected, ..)| *selected);
            for (_, x, y, span) in glyphs {
                ctx.print(x, y, span);
            }
        });

    f.render_widget(widget, frame.area);
}

/// Min and max labels on both axes
fn render_ticks(f: &mut Frame, frame: &PlotFrame, theme: &Theme) {
    let style = Style::default().fg(theme.muted);
    let area = frame.area;
    let label_width = Y_TICK_WIDTH.saturating_sub(1);
    let x = area.x.saturating_sub(Y_TICK_WIDTH);

    let y_max = format_tick(frame.untransform_y(frame.bounds.y[1]));
    let y_min = format_tick(frame.untransform_y(frame.bounds.y[0]));
    f.render_widget(
        Paragraph::new(y_max).alignment(Alignment::Right).style(style),
        Rect::new(x, area.y, label_width, 1),
    );
    f.render_widget(
        Paragraph::new(y_min).alignment(Alignment::Right).style(style),
        Rect::new(x, area.bottom() - 1, label_width, 1),
    );

    let row = Rect::new(area.x, area.bottom(), area.width, 1);
    let x_min = format_tick(frame.untransform_x(frame.bounds.x[0]));
    let x_max = format_tick(frame.untransform_x(frame.bounds.x[1]));
    f.render_widget(Paragraph::new(x_min).style(style), row);
    f.render_widget(
        Paragraph::new(x_max).alignment(Alignment::Right).style(style),
        row,
    );
}

/// Legend entries in the top-right corner, one per distinct trace name
fn render_legend(f: &mut Frame, frame: &PlotFrame, canvas: &ChartCanvas, theme: &Theme) {
    let mut seen: Vec<&str> = Vec::new();
    let mut lines: Vec<Line> = Vec::new();

    for (_, trace) in canvas.traces_on(frame.subplot) {
        if !trace.show_legend || seen.contains(&trace.name.as_str()) {
            continue;
        }
        seen.push(&trace.name);

        let color = if trace.marker.is_empty() {
            trace_color(trace.line_color, theme)
        } else {
            theme.fg
        };
        let symbol = match trace.mode {
            TraceMode::Lines => "─",
            TraceMode::ErrorBars => "│",
            _ => glyph(trace.shape),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", symbol), Style::default().fg(color)),
            Span::styled(trace.name.clone(), Style::default().fg(theme.fg)),
        ]));
    }

    if lines.is_empty() {
        return;
    }

    let width = (lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16 + 2)
        .min(frame.area.width);
    let height = (lines.len() as u16).min(frame.area.height);
    let legend_area = Rect::new(frame.area.right() - width, frame.area.y, width, height);

    f.render_widget(Clear, legend_area);
    f.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.bg)),
        legend_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::Axis;
    use crate::selection::style::StyleChannels;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn canvas() -> ChartCanvas {
        let mut c = ChartCanvas::new(
            "Selected B",
            Axis {
                label: "x label".into(),
                log: false,
            },
            Axis {
                label: "y label".into(),
                log: false,
            },
        );
        let mut channels = StyleChannels::uniform(vec![Rgb(10, 10, 10); 3], 0.3, 6.0);
        channels.opacity[1] = 1.0;
        c.add_trace(Trace::markers(
            "points",
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0, 2.0],
            vec!["A".into(), "B".into(), "C".into()],
            channels,
        ));
        c
    }

    fn context<'a>(canvas: &'a ChartCanvas, theme: &'a Theme) -> ChartContext<'a> {
        ChartContext {
            canvas,
            theme,
            selected: None,
        }
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn single_plot_returns_one_frame() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let c = canvas();
        let theme = Theme::dark();
        let mut frames = Vec::new();
        terminal
            .draw(|f| frames = render(f, f.area(), &context(&c, &theme), false))
            .unwrap();

        assert_eq!(frames.len(), 1);
        let text = buffer_text(&terminal);
        assert!(text.contains("Selected B"));
        assert!(text.contains("x label"));
        // The opaque point is a glyph, the others are braille
        assert_eq!(text.matches('●').count(), 2); // marker + legend
    }

    #[test]
    fn subplot_grid_skips_empty_cells() {
        let mut c = canvas();
        c.subplots = vec![
            crate::charts::Subplot {
                title: "PACS_70".into(),
                annotations: vec!["RMSE = 0.10".into()],
            },
            crate::charts::Subplot {
                title: "Mdust".into(),
                annotations: vec!["no data".into()],
            },
        ];

        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        let theme = Theme::dark();
        let mut frames = Vec::new();
        terminal
            .draw(|f| frames = render(f, f.area(), &context(&c, &theme), true))
            .unwrap();

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].subplot, 0);
        let text = buffer_text(&terminal);
        assert!(text.contains("RMSE = 0.10"));
        assert!(text.contains("no data"));
    }

    #[test]
    fn tiny_area_is_not_clickable() {
        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        let c = canvas();
        let theme = Theme::dark();
        let mut frames = Vec::new();
        terminal
            .draw(|f| frames = render(f, f.area(), &context(&c, &theme), false))
            .unwrap();
        assert!(frames.is_empty());
    }

    #[test]
    fn selected_glyph_is_never_covered() {
        const RED: Rgb = Rgb(200, 0, 0);
        const BLUE: Rgb = Rgb(0, 0, 200);

        // A and B share a cell; B is opaque too and comes later in row order
        let mut channels = StyleChannels::uniform(vec![RED, BLUE, BLUE], 0.6, 6.0);
        channels.opacity[0] = 1.0;
        channels.opacity[2] = 0.3;
        let mut c = ChartCanvas::new("t", Axis::default(), Axis::default());
        c.add_trace(Trace::markers(
            "points",
            vec![0.0, 0.0, 10.0],
            vec![0.0, 0.0, 10.0],
            vec!["A".into(), "B".into(), "C".into()],
            channels,
        ));

        let theme = Theme::dark();
        let selected = EntityKey::from("A");
        let chart = ChartContext {
            canvas: &c,
            theme: &theme,
            selected: Some(&selected),
        };
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|f| {
                render(f, f.area(), &chart, false);
            })
            .unwrap();

        let glyph_colors: Vec<Color> = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .filter(|cell| cell.symbol() == "●")
            .map(|cell| cell.fg)
            .collect();
        assert!(glyph_colors.contains(&Color::from(RED)));
        assert!(!glyph_colors.contains(&Color::from(BLUE)));
    }
}
