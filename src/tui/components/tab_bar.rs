// Tab bar for the views beside the SED chart

use crate::explorer::Tab;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::Tabs,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let available = app.explorer.tab_view(*tab).is_some();
            let label = if available {
                format!(" {}│{} ", i + 1, tab.title())
            } else {
                format!(" {}│{} (n/a) ", i + 1, tab.title())
            };
            let fg = if available { theme.fg } else { theme.muted };
            Line::styled(label, Style::default().fg(fg))
        })
        .collect();

    let selected = Tab::ALL.iter().position(|t| *t == app.tab).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme.fg))
        .highlight_style(
            Style::default()
                .fg(theme.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(tabs, area);
}
