// App state for the explorer TUI
//
// Owns the `Explorer` and everything the screen needs between frames: the
// active tab, overlays, and the plot frames of the last draw so mouse clicks
// can be resolved against exactly what was on screen.

use super::components::logs_panel::LogsPanel;
use super::components::search_bar::SearchBar;
use super::components::toast::Toast;
use super::input::KeyGate;
use super::plot::PlotFrame;
use super::theme::{Theme, ThemeKind};
use crate::config::Config;
use crate::explorer::{Explorer, Tab};
use crate::logging::LogBuffer;
use crate::selection::{EntityKey, SelectionReport, SelectionView};
use crossterm::event::KeyCode;
use ratatui::layout::{Position, Rect};
use std::time::Instant;

/// Which chart a plot frame belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Sed,
    Tab(Tab),
}

/// A clickable plot area recorded during the last draw
#[derive(Debug, Clone, Copy)]
pub struct HitRegion {
    pub pane: Pane,
    pub frame: PlotFrame,
}

pub struct App {
    pub explorer: Explorer,
    pub tab: Tab,

    pub theme_kind: ThemeKind,
    pub theme: Theme,

    pub log_buffer: LogBuffer,
    pub logs_panel: LogsPanel,
    pub show_logs: bool,
    /// Where the logs panel was drawn, for wheel scrolling
    pub logs_area: Option<Rect>,

    /// Active search prompt; owns keyboard input while open
    pub search: Option<SearchBar>,
    pub show_help: bool,
    pub toast: Option<Toast>,

    /// Plot frames from the last draw
    pub hit_regions: Vec<HitRegion>,

    keys: KeyGate,
    started: Instant,
    pub should_quit: bool,
}

impl App {
    pub fn new(explorer: Explorer, log_buffer: LogBuffer, config: &Config) -> Self {
        let theme_kind = ThemeKind::from_name(&config.theme);
        Self {
            explorer,
            tab: Tab::TrueVsPred,
            theme_kind,
            theme: theme_kind.theme(),
            log_buffer,
            logs_panel: LogsPanel::new(),
            show_logs: config.features.logs_panel,
            logs_area: None,
            search: None,
            show_help: false,
            toast: None,
            hit_regions: Vec::new(),
            keys: KeyGate::new(),
            started: Instant::now(),
            should_quit: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Input debounce
    // ─────────────────────────────────────────────────────────────────────

    /// Returns true if the key should trigger its action
    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        self.keys.press(key)
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.keys.release(key);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────

    pub fn select(&mut self, key: EntityKey) -> SelectionReport {
        let known = self.explorer.names().binary_search(&key).is_ok();
        let report = self.explorer.select(key);

        let message = if known {
            format!("{} · {} point(s)", report.key, report.highlighted_rows())
        } else {
            format!("{} is not in any dataset", report.key)
        };
        self.show_toast(message);
        report
    }

    /// Step through galaxies in name order
    pub fn step(&mut self, step: isize) {
        if let Some(key) = self.explorer.neighbour(step) {
            self.select(key);
        }
    }

    /// Resolve a click against the plot frames of the last draw
    pub fn click(&mut self, column: u16, row: u16) -> Option<EntityKey> {
        let region = self
            .hit_regions
            .iter()
            .find(|r| r.frame.contains(column, row))
            .copied()?;

        let key = {
            let view = self.pane_view(region.pane)?;
            region.frame.hit_test(view.canvas(), column, row)?
        };
        tracing::debug!("Clicked {} at ({}, {})", key, column, row);
        self.select(key.clone());
        Some(key)
    }

    pub fn pane_view(&self, pane: Pane) -> Option<&dyn SelectionView> {
        match pane {
            Pane::Sed => self.explorer.sed_view(),
            Pane::Tab(tab) => self.explorer.tab_view(tab),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────

    pub fn open_search(&mut self) {
        self.search = Some(SearchBar::new());
    }

    /// Select the first galaxy matching `query`
    pub fn submit_search(&mut self, query: &str) {
        self.search = None;
        match self.explorer.search(query) {
            Some(key) => {
                self.select(key);
            }
            None => self.show_toast(format!("No galaxy matches '{}'", query.trim())),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tabs, theme, panels
    // ─────────────────────────────────────────────────────────────────────

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        if self.explorer.tab_view(tab).is_none() {
            self.show_toast(format!("{} data unavailable", tab.title()));
        }
    }

    pub fn next_tab(&mut self) {
        self.set_tab(self.tab.next());
    }

    pub fn cycle_theme(&mut self) {
        self.theme_kind = self.theme_kind.next();
        self.theme = self.theme_kind.theme();
        self.show_toast(format!("Theme: {}", self.theme_kind.name()));
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    pub fn mouse_over_logs(&self, column: u16, row: u16) -> bool {
        self.logs_area
            .is_some_and(|area| area.contains(Position::new(column, row)))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Toast, uptime
    // ─────────────────────────────────────────────────────────────────────

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// Drop the toast once it has been on screen long enough
    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    pub fn uptime(&self) -> String {
        let secs = self.started.elapsed().as_secs();
        let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
        if h > 0 {
            format!("{}h{:02}m", h, m)
        } else {
            format!("{}m{:02}s", m, s)
        }
    }
}

/// Three galaxies in both datasets, nothing selected
#[cfg(test)]
pub(crate) fn test_app() -> App {
    use crate::data::{sed::SedCatalog, uncertainty::UncertaintyData, Table};
    use crate::explorer::Datasets;
    use crate::selection::style::ViewStyle;
    use std::sync::Arc;

    let seds = "\
galname,obs-PACS_70,pred-PACS_70,obs-SPIRE_250,pred-SPIRE_250,sim-PACS_70,simerr-PACS_70
A1,1.0,1.2,2.0,2.1,1.1,0.1
B2,2.0,2.1,3.0,2.8,2.2,0.2
C3,3.0,2.7,4.0,4.1,3.1,0.1
";
    let unc = "\
galname,pred_unc,y_diff
A1,0.1,0.05
B2,0.4,-0.2
C3,0.7,0.3
";
    let sed = SedCatalog::from_table(Table::parse(seds, "s").unwrap(), "s").unwrap();
    let unc = UncertaintyData::from_table(&Table::parse(unc, "u").unwrap(), "u").unwrap();
    let datasets = Datasets {
        sed: Arc::new(sed),
        uncertainty: Some(unc),
        status: Vec::new(),
    };
    let explorer = Explorer::new(&datasets, &ViewStyle::default(), &[], None);
    App::new(explorer, LogBuffer::new(), &Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(app: &mut App) {
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal
            .draw(|f| super::super::views::draw(f, app))
            .unwrap();
    }

    #[test]
    fn step_selects_neighbours() {
        let mut app = test_app();
        app.step(1);
        assert_eq!(app.explorer.selected().map(|k| k.as_str()), Some("A1"));
        app.step(1);
        assert_eq!(app.explorer.selected().map(|k| k.as_str()), Some("B2"));
        app.step(-1);
        assert_eq!(app.explorer.selected().map(|k| k.as_str()), Some("A1"));
        assert!(app.toast.is_some());
    }

    #[test]
    fn search_miss_keeps_selection() {
        let mut app = test_app();
        app.select("B2".into());
        app.open_search();
        app.submit_search("zzz");
        assert!(app.search.is_none());
        assert_eq!(app.explorer.selected().map(|k| k.as_str()), Some("B2"));
        assert!(app.toast.as_ref().unwrap().message.contains("zzz"));
    }

    #[test]
    fn draw_records_clickable_regions() {
        let mut app = test_app();
        draw(&mut app);
        // Nothing selected: the SED chart is empty and not clickable
        assert!(!app.hit_regions.iter().any(|r| r.pane == Pane::Sed));

        app.select("B2".into());
        draw(&mut app);
        assert!(app.hit_regions.iter().any(|r| r.pane == Pane::Sed));
        assert!(app
            .hit_regions
            .iter()
            .any(|r| r.pane == Pane::Tab(Tab::TrueVsPred)));
    }

    #[test]
    fn clicking_a_point_selects_its_galaxy() {
        let mut app = test_app();
        app.set_tab(Tab::Uncertainty);
        draw(&mut app);

        let region = *app
            .hit_regions
            .iter()
            .find(|r| r.pane == Pane::Tab(Tab::Uncertainty))
            .unwrap();
        // C3 sits at (0.7, 0.3), the top-right data point
        let (col, row) = region.frame.to_screen(0.7, 0.3).unwrap();

        let clicked = app.click(col.round() as u16, row.round() as u16);
        assert_eq!(clicked, Some("C3".into()));
        assert_eq!(app.explorer.selected().map(|k| k.as_str()), Some("C3"));
    }

    #[test]
    fn clicking_empty_space_does_nothing() {
        let mut app = test_app();
        draw(&mut app);
        assert_eq!(app.click(0, 0), None);
        assert!(app.explorer.selected().is_none());
    }

    #[test]
    fn tabs_cycle() {
        let mut app = test_app();
        app.next_tab();
        assert_eq!(app.tab, Tab::Uncertainty);
        app.next_tab();
        assert_eq!(app.tab, Tab::TrueVsPred);
    }
}
