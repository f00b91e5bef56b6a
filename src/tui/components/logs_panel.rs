//! Logs panel component
//!
//! Shows the tracing buffer with color-coded levels. Follows new entries
//! until scrolled up with PageUp or the mouse wheel.

use super::scrollbar::render_scrollbar;
use crate::logging::{LogEntry, LogLevel};
use crate::tui::app::App;
use crate::tui::scroll::ScrollState;
use crate::tui::theme::Theme;
use crate::tui::traits::{Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub struct LogsPanel {
    scroll: ScrollState,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::new(),
        }
    }

    /// Sync scroll dimensions with the buffer (call each frame)
    pub fn sync_entries(&mut self, entries: &[LogEntry], viewport_height: usize) {
        self.scroll.update_dimensions(entries.len(), viewport_height);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll.scroll_up(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll.scroll_down(lines);
    }

    pub fn is_following(&self) -> bool {
        self.scroll.auto_follow
    }

    fn render_with_entries(&self, f: &mut Frame, area: Rect, entries: &[LogEntry], theme: &Theme) {
        let (start, end) = self.scroll.visible_range();

        let items: Vec<ListItem> = entries
            .iter()
            .skip(start)
            .take(end - start)
            .map(|entry| {
                ListItem::new(format_log_entry(entry)).style(log_level_style(&entry.level, theme))
            })
            .collect();

        let title = if self.is_following() {
            " System Logs "
        } else {
            " System Logs [scroll] "
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(title),
        );

        f.render_widget(list, area);
        render_scrollbar(f, area, &self.scroll);
    }
}

impl Default for LogsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Interactive for LogsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::PageUp => {
                self.scroll.page_up();
                Handled::Yes
            }
            KeyCode::PageDown => {
                self.scroll.page_down();
                Handled::Yes
            }
            KeyCode::End => {
                let total = self.scroll.total();
                self.scroll.scroll_down(total);
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("PgUp/PgDn:scroll logs  End:follow")
    }
}

/// Module path of the event with the crate prefix dropped
fn short_target(target: &str) -> &str {
    target
        .strip_prefix(concat!(env!("CARGO_CRATE_NAME"), "::"))
        .unwrap_or(target)
}

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}: {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        short_target(&entry.target),
        entry.message
    )
}

fn log_level_style(level: &LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.log_error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.log_warn),
        LogLevel::Info => Style::default().fg(theme.log_info),
        LogLevel::Debug => Style::default().fg(theme.log_debug),
        LogLevel::Trace => Style::default().fg(theme.log_trace),
    }
}

/// Render the logs panel owned by App
pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let height = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.get_all();

    app.logs_panel.sync_entries(&entries, height);
    app.logs_area = Some(area);
    app.logs_panel
        .render_with_entries(f, area, &entries, &app.theme);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crossterm::event::KeyModifiers;

    fn entries(n: usize) -> Vec<LogEntry> {
        (0..n)
            .map(|i| LogEntry {
                timestamp: Utc::now(),
                level: LogLevel::Info,
                target: "test".into(),
                message: format!("line {}", i),
            })
            .collect()
    }

    #[test]
    fn page_up_stops_following() {
        let mut panel = LogsPanel::new();
        panel.sync_entries(&entries(30), 10);
        assert!(panel.is_following());

        let key = KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE);
        assert_eq!(panel.handle_key(key), Handled::Yes);
        assert!(!panel.is_following());

        let key = KeyEvent::new(KeyCode::End, KeyModifiers::NONE);
        panel.handle_key(key);
        assert!(panel.is_following());
    }

    #[test]
    fn other_keys_bubble_up() {
        let mut panel = LogsPanel::new();
        let key = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        assert_eq!(panel.handle_key(key), Handled::No);
    }

    #[test]
    fn entry_format() {
        let entry = &entries(1)[0];
        assert!(format_log_entry(entry).ends_with("INFO  test: line 0"));
    }

    #[test]
    fn targets_drop_the_crate_prefix() {
        assert_eq!(short_target("firenet_explorer::tui::app"), "tui::app");
        assert_eq!(short_target("firenet_explorer"), "firenet_explorer");
        assert_eq!(short_target("hyper::client"), "hyper::client");
    }
}
