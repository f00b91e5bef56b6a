//! Galaxy search prompt
//!
//! Opened with `/`. Owns keyboard input until Enter or Esc; the first
//! matching name is previewed as the user types.

use crate::tui::app::App;
use crate::tui::traits::{Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    Submit(String),
    Cancel,
}

#[derive(Debug, Default)]
pub struct SearchBar {
    query: String,
    action: Option<SearchAction>,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Pending submit or cancel, consumed once
    pub fn take_action(&mut self) -> Option<SearchAction> {
        self.action.take()
    }
}

impl Interactive for SearchBar {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Enter => {
                self.action = Some(SearchAction::Submit(self.query.clone()));
            }
            KeyCode::Esc => {
                self.action = Some(SearchAction::Cancel);
            }
            KeyCode::Backspace => {
                self.query.pop();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.query.clear();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.query.push(c);
            }
            // Ctrl+C and friends fall through to the global handler
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("Enter:select  Esc:cancel  Ctrl+U:clear")
    }
}

/// Tail of `s` that fits in `width` columns
fn fit_tail(s: &str, width: usize) -> &str {
    let mut start = 0;
    while s[start..].width() > width {
        match s[start..].chars().next() {
            Some(c) => start += c.len_utf8(),
            None => break,
        }
    }
    &s[start..]
}

/// Render the prompt along the bottom of `area`
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(search) = &app.search else {
        return;
    };
    let theme = &app.theme;

    let height = 3.min(area.height);
    let prompt_area = Rect::new(
        area.x,
        area.bottom().saturating_sub(height),
        area.width,
        height,
    );

    let preview = match app.explorer.search(search.query()) {
        Some(key) => Span::styled(format!("  → {}", key), Style::default().fg(theme.selected_fg)),
        None if search.query().trim().is_empty() => Span::raw(""),
        None => Span::styled("  no match", Style::default().fg(theme.muted)),
    };

    let room = (prompt_area.width as usize)
        .saturating_sub(4 + preview.content.width());
    let line = Line::from(vec![
        Span::styled("/", Style::default().fg(theme.title).add_modifier(Modifier::BOLD)),
        Span::styled(fit_tail(search.query(), room).to_string(), Style::default().fg(theme.fg)),
        Span::styled("▏", Style::default().fg(theme.border_focused)),
        preview,
    ]);

    let prompt = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border_focused))
            .title(" Search galaxy ")
            .style(Style::default().bg(theme.bg)),
    );

    f.render_widget(Clear, prompt_area);
    f.render_widget(prompt, prompt_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(bar: &mut SearchBar, code: KeyCode) -> Handled {
        bar.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn typing_and_submit() {
        let mut bar = SearchBar::new();
        for c in "m3x".chars() {
            press(&mut bar, KeyCode::Char(c));
        }
        press(&mut bar, KeyCode::Backspace);
        assert_eq!(bar.query(), "m3");
        assert_eq!(bar.take_action(), None);

        press(&mut bar, KeyCode::Enter);
        assert_eq!(bar.take_action(), Some(SearchAction::Submit("m3".into())));
        assert_eq!(bar.take_action(), None);
    }

    #[test]
    fn escape_cancels() {
        let mut bar = SearchBar::new();
        press(&mut bar, KeyCode::Esc);
        assert_eq!(bar.take_action(), Some(SearchAction::Cancel));
    }

    #[test]
    fn control_keys_bubble_up() {
        let mut bar = SearchBar::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(bar.handle_key(ctrl_c), Handled::No);
        assert_eq!(bar.query(), "");
    }

    #[test]
    fn long_queries_show_their_tail() {
        assert_eq!(fit_tail("G12.DR1.3786", 4), "3786");
        assert_eq!(fit_tail("abc", 10), "abc");
        assert_eq!(fit_tail("abc", 0), "");
    }
}
