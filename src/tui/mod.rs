// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, mouse clicks, timer ticks)
// - Routing clicks on chart points into galaxy selection

pub mod app;
pub mod components;
pub mod input;
pub mod layout;
pub mod plot;
pub mod scroll;
pub mod theme;
pub mod traits;
pub mod views;

use crate::config::Config;
use crate::explorer::{Explorer, Tab};
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use components::search_bar::SearchAction;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use traits::{Handled, Interactive};

/// Lines moved per mouse wheel notch in the logs panel
const WHEEL_LINES: usize = 3;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done. Returns the explorer so the caller controls when the views
/// (and the session log sender they hold) are dropped.
pub async fn run_tui(explorer: Explorer, log_buffer: LogBuffer, config: &Config) -> Result<Explorer> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(explorer, log_buffer, config);

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result.map(|_| app.explorer)
}

/// Main event loop
///
/// Waits on terminal input and a redraw tick with tokio::select!. Selection
/// work happens synchronously inside the input handlers, so the frame drawn
/// right after a click already shows every view updated.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            // Periodic tick for redrawing (toast expiry, uptime, new log lines)
            _ = tick_interval.tick() => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Search prompt → Logs panel → Global → Explorer
pub(crate) fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    // Keep the key gate in sync even while the prompt owns input
    if key_event.kind == KeyEventKind::Release {
        app.handle_key_release(key_event.code);
        return;
    }
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Layer 1: Search prompt captures all input when open
    if handle_search_input(app, key_event) {
        return;
    }

    // Layer 2: Logs panel scrolling
    if app.show_logs && app.logs_panel.handle_key(key_event).was_handled() {
        return;
    }

    // Layer 3: Global keys
    if handle_global_keys(app, &key_event) {
        return;
    }

    // Layer 4: Explorer keys (the key gate decides repeat vs once)
    let key = key_event.code;
    if !app.handle_key_press(key) {
        return;
    }
    match key {
        KeyCode::Char('n') | KeyCode::Down => app.step(1),
        KeyCode::Char('N') | KeyCode::Char('p') | KeyCode::Up => app.step(-1),
        KeyCode::Tab | KeyCode::BackTab => app.next_tab(),
        KeyCode::Char('1') => app.set_tab(Tab::TrueVsPred),
        KeyCode::Char('2') => app.set_tab(Tab::Uncertainty),
        KeyCode::Esc => app.show_help = false,
        _ => {}
    }
}

/// Returns true if the search prompt absorbed the key
fn handle_search_input(app: &mut App, key_event: KeyEvent) -> bool {
    let Some(search) = app.search.as_mut() else {
        return false;
    };

    if search.handle_key(key_event) == Handled::No {
        // Only Ctrl+C gets past an open prompt
        if key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            app.should_quit = true;
        }
        return true;
    }

    match search.take_action() {
        Some(SearchAction::Submit(query)) => app.submit_search(&query),
        Some(SearchAction::Cancel) => app.search = None,
        None => {}
    }
    true
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    let key = key_event.code;

    if key == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return true;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            if app.handle_key_press(key) {
                app.should_quit = true;
            }
            true
        }
        KeyCode::Char('?') => {
            if app.handle_key_press(key) {
                app.show_help = !app.show_help;
            }
            true
        }
        KeyCode::Char('/') => {
            if app.handle_key_press(key) {
                app.show_help = false;
                app.open_search();
            }
            true
        }
        KeyCode::Char('l') => {
            if app.handle_key_press(key) {
                app.toggle_logs();
            }
            true
        }
        KeyCode::Char('t') => {
            if app.handle_key_press(key) {
                app.cycle_theme();
            }
            true
        }
        _ => false,
    }
}

/// Handle mouse input: left click selects, the wheel scrolls the logs
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    let (column, row) = (mouse_event.column, mouse_event.row);
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.click(column, row);
        }
        MouseEventKind::ScrollUp if app.mouse_over_logs(column, row) => {
            app.logs_panel.scroll_up(WHEEL_LINES);
        }
        MouseEventKind::ScrollDown if app.mouse_over_logs(column, row) => {
            app.logs_panel.scroll_down(WHEEL_LINES);
        }
        _ => {}
    }
}
