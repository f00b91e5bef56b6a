//! Key reference overlay, toggled with `?`

use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

const KEYS: &[(&str, &str)] = &[
    ("click", "select the galaxy under the cursor"),
    ("n / N", "next / previous galaxy"),
    ("↓ / ↑", "next / previous galaxy"),
    ("/", "search by name (regex)"),
    ("Tab", "switch view"),
    ("1 / 2", "Predicted vs True / Uncertainty"),
    ("l", "toggle logs panel"),
    ("PgUp / PgDn", "scroll logs"),
    ("t", "cycle theme"),
    ("?", "toggle this help"),
    ("q", "quit"),
];

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let width = 52.min(area.width);
    let height = (KEYS.len() as u16 + 4).min(area.height);
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    let mut lines = vec![Line::raw("")];
    lines.extend(KEYS.iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(
                format!("  {:>12}  ", key),
                Style::default()
                    .fg(theme.border_focused)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(*action, Style::default().fg(theme.fg)),
        ])
    }));

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.title))
            .title(" Keys ")
            .style(Style::default().bg(theme.bg)),
    );

    f.render_widget(Clear, popup);
    f.render_widget(help, popup);
}
