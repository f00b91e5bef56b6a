// Explorer view - the SED pane and the tabbed pane
//
// Returns the clickable plot areas of both panes so the app can resolve the
// next mouse click against what is on screen now.

use crate::charts::ChartCanvas;
use crate::tui::app::{App, HitRegion, Pane};
use crate::tui::components::{self, chart, chart::ChartContext};
use crate::tui::layout::chart_panes;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render(f: &mut Frame, area: Rect, app: &App) -> Vec<HitRegion> {
    let (sed_area, tab_pane) = chart_panes(area);
    let mut regions = Vec::new();

    if let Some(view) = app.explorer.sed_view() {
        regions.extend(
            chart::render(f, sed_area, &context(app, view.canvas()), false)
                .into_iter()
                .map(|frame| HitRegion {
                    pane: Pane::Sed,
                    frame,
                }),
        );
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(tab_pane);
    components::render_tabs(f, chunks[0], app);

    match app.explorer.tab_view(app.tab) {
        Some(view) => regions.extend(
            chart::render(f, chunks[1], &context(app, view.canvas()), true)
                .into_iter()
                .map(|frame| HitRegion {
                    pane: Pane::Tab(app.tab),
                    frame,
                }),
        ),
        None => render_unavailable(f, chunks[1], app),
    }

    regions
}

fn context<'a>(app: &'a App, canvas: &'a ChartCanvas) -> ChartContext<'a> {
    ChartContext {
        canvas,
        theme: &app.theme,
        selected: app.explorer.selected(),
    }
}

fn render_unavailable(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let message = format!(
        "{} data could not be loaded; see the logs panel (l)",
        app.tab.title()
    );
    let y = inner.y + inner.height / 2;
    f.render_widget(
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted)),
        Rect::new(inner.x, y, inner.width, 1.min(inner.height)),
    );
}
