// Views module - screen-level rendering logic
//
// There is a single screen: the SED chart beside a tabbed pane holding the
// Predicted vs True grid or the uncertainty scatter. Overlays (search,
// help, toast) are drawn last, in that order.

mod explorer;

use super::app::App;
use crate::tui::components;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Height of the logs panel when shown
const LOGS_HEIGHT: u16 = 8;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.bg));
    f.render_widget(bg_block, f.area());

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(10)];
    if app.show_logs {
        constraints.push(Constraint::Length(LOGS_HEIGHT));
    }
    constraints.push(Constraint::Length(2));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    let content = chunks[1];
    components::render_title(f, chunks[0], app);

    app.hit_regions = explorer::render(f, content, app);

    if app.show_logs {
        components::render_logs_panel(f, chunks[2], app);
    } else {
        app.logs_area = None;
    }
    components::render_status(f, chunks[chunks.len() - 1], app);

    // Overlays
    components::search_bar::render(f, content, app);
    if app.show_help {
        components::help::render(f, content, app);
    }
    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }

    // Clear expired toast after render
    app.clear_expired_toast();
}
