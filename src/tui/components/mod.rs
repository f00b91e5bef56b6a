// Components module - reusable UI building blocks
//
// Shell components are rendered on every frame:
// - Title bar: app name and the current selection
// - Tab bar: Predicted vs True / Uncertainty
// - Status bar: galaxy count, uptime, key hints
// - Logs panel: system log entries (toggle with `l`)
//
// Charts, the search prompt, help and toasts are drawn by the view layer.

pub mod chart;
pub mod help;
pub mod logs_panel;
pub mod scrollbar;
pub mod search_bar;
pub mod status_bar;
pub mod tab_bar;
pub mod title_bar;
pub mod toast;

use crate::tui::app::App;
use ratatui::{layout::Rect, Frame};

/// Render the title bar (convenience wrapper)
pub fn render_title(f: &mut Frame, area: Rect, app: &App) {
    title_bar::render(f, area, app);
}

/// Render the status bar (convenience wrapper)
pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    status_bar::render(f, area, app);
}

/// Render the tab bar (convenience wrapper)
pub fn render_tabs(f: &mut Frame, area: Rect, app: &App) {
    tab_bar::render(f, area, app);
}

/// Render the logs panel (convenience wrapper)
pub fn render_logs_panel(f: &mut Frame, area: Rect, app: &mut App) {
    logs_panel::render(f, area, app);
}
