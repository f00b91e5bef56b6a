// Status bar component
//
// Galaxy count, active tab and key hints. A component that owns input
// (the search prompt) replaces the hints with its own.

use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use crate::tui::traits::Interactive;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const HINTS_WIDE: &str = "n/N:step  /:search  Tab:view  l:logs  t:theme  ?:help  q:quit";
const HINTS_COMPACT: &str = "n/N / Tab ? q";

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);
    let galaxies = app.explorer.names().len();

    let hints = match app.search.as_ref().and_then(|s| s.focus_hint()) {
        Some(hint) => hint,
        None if bp.at_least(Breakpoint::Wide) => HINTS_WIDE,
        None => HINTS_COMPACT,
    };

    let status_text = if bp.at_least(Breakpoint::Wide) {
        format!(
            " {} │ {} galaxies │ {} │ {} │ {}",
            app.uptime(),
            galaxies,
            app.tab.title(),
            app.theme_kind.name(),
            hints
        )
    } else {
        format!(" {} │ {} │ {}", app.uptime(), galaxies, hints)
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(app.theme.border)),
        );

    f.render_widget(status, area);
}
