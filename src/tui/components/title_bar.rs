// Title bar component
//
// App name on the left, the selected galaxy after it.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let title_style = Style::default().fg(theme.title).add_modifier(Modifier::BOLD);

    let mut spans = vec![Span::styled(" ✦ FIREnet Explorer", title_style)];
    match app.explorer.selected() {
        Some(key) => {
            spans.push(Span::styled(" ──── ", Style::default().fg(theme.border)));
            spans.push(Span::styled(
                key.to_string(),
                Style::default()
                    .fg(theme.selected_fg)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        None => spans.push(Span::styled(
            " ──── click a point or press / to search",
            Style::default().fg(theme.muted),
        )),
    }

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.title))
            .title_top(Line::from(" ? ").right_aligned()),
    );

    f.render_widget(title, area);
}
