// Theme system for the TUI
//
// Colors for the chrome around the charts. Marker colors come from the data
// (inferno palette and the highlight style) and are never themed.

use ratatui::style::Color;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    Dracula,
    Nord,
}

impl ThemeKind {
    pub fn all() -> &'static [ThemeKind] {
        &[
            ThemeKind::Dark,
            ThemeKind::Light,
            ThemeKind::Dracula,
            ThemeKind::Nord,
        ]
    }

    /// Get the next theme in the cycle
    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
            ThemeKind::Dracula => "Dracula",
            ThemeKind::Nord => "Nord",
        }
    }

    /// Case-insensitive lookup; unknown names fall back to Dark
    pub fn from_name(name: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_else(|| {
                tracing::warn!("Unknown theme '{}', using Dark", name);
                ThemeKind::Dark
            })
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
            ThemeKind::Dracula => Theme::dracula(),
            ThemeKind::Nord => Theme::nord(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub border: Color,
    pub border_focused: Color,

    pub title: Color,
    pub status_bar: Color,
    pub muted: Color,

    /// Selected galaxy name in the title and status bars
    pub selected_fg: Color,

    /// Axis lines, ticks and reference lines drawn in black by the data
    pub axis: Color,

    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
    pub log_trace: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            border: Color::Gray,
            border_focused: Color::Cyan,

            title: Color::Cyan,
            status_bar: Color::Green,
            muted: Color::DarkGray,

            selected_fg: Color::Yellow,
            axis: Color::Gray,

            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Blue,
            log_debug: Color::Gray,
            log_trace: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            border: Color::DarkGray,
            border_focused: Color::Blue,

            title: Color::Blue,
            status_bar: Color::DarkGray,
            muted: Color::Gray,

            selected_fg: Color::Rgb(184, 134, 11), // Dark goldenrod
            axis: Color::Black,

            log_error: Color::Red,
            log_warn: Color::Rgb(184, 134, 11),
            log_info: Color::Blue,
            log_debug: Color::DarkGray,
            log_trace: Color::Gray,
        }
    }

    pub fn dracula() -> Self {
        Self {
            bg: Color::Rgb(40, 42, 54),
            fg: Color::Rgb(248, 248, 242),
            border: Color::Rgb(98, 114, 164),
            border_focused: Color::Rgb(189, 147, 249),

            title: Color::Rgb(189, 147, 249),      // Purple
            status_bar: Color::Rgb(80, 250, 123),  // Green
            muted: Color::Rgb(98, 114, 164),

            selected_fg: Color::Rgb(241, 250, 140), // Yellow
            axis: Color::Rgb(248, 248, 242),

            log_error: Color::Rgb(255, 85, 85),
            log_warn: Color::Rgb(241, 250, 140),
            log_info: Color::Rgb(139, 233, 253),
            log_debug: Color::Rgb(98, 114, 164),
            log_trace: Color::Rgb(68, 71, 90),
        }
    }

    pub fn nord() -> Self {
        Self {
            bg: Color::Rgb(46, 52, 64),
            fg: Color::Rgb(236, 239, 244),
            border: Color::Rgb(76, 86, 106),
            border_focused: Color::Rgb(136, 192, 208),

            title: Color::Rgb(136, 192, 208),     // Frost
            status_bar: Color::Rgb(163, 190, 140), // Green
            muted: Color::Rgb(76, 86, 106),

            selected_fg: Color::Rgb(235, 203, 139), // Yellow
            axis: Color::Rgb(216, 222, 233),

            log_error: Color::Rgb(191, 97, 106),
            log_warn: Color::Rgb(235, 203, 139),
            log_info: Color::Rgb(129, 161, 193),
            log_debug: Color::Rgb(76, 86, 106),
            log_trace: Color::Rgb(67, 76, 94),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_returns_to_start() {
        let mut kind = ThemeKind::Dark;
        for _ in 0..ThemeKind::all().len() {
            kind = kind.next();
        }
        assert_eq!(kind, ThemeKind::Dark);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(ThemeKind::from_name("nord"), ThemeKind::Nord);
        assert_eq!(ThemeKind::from_name(" Dracula "), ThemeKind::Dracula);
        assert_eq!(ThemeKind::from_name("Monokai"), ThemeKind::Dark);
    }
}
