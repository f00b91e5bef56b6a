// Startup module - banner and dataset loading status
//
// Printed to stdout before the TUI takes over the screen (or in headless
// mode), and mirrored into the log buffer so the logs panel shows the same
// boot sequence.

use crate::config::{Config, VERSION};
use crate::explorer::LoadStatus;
use std::path::Path;

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Print the startup banner and dataset status
pub fn print_startup(
    config: &Config,
    datasets: &[LoadStatus],
    initial: Option<&str>,
    session_log: Option<&Path>,
) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}FIREnet Explorer{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Linked SED and prediction views{RESET}");
    println!();

    match Config::config_path() {
        Some(path) if path.exists() => {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        }
        _ => println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}"),
    }
    println!();

    println!("  {DIM}Loading datasets...{RESET}");
    for status in datasets {
        match &status.result {
            Ok(rows) => println!(
                "    {GREEN}✓{RESET} {:<12} {:>6} galaxies {DIM}{}{RESET}",
                status.name, rows, status.source
            ),
            Err(e) => println!("    {RED}✗{RESET} {:<12} {RED}{}{RESET}", status.name, e),
        }
        for note in &status.notes {
            println!("      {DIM}· {}{RESET}", note);
        }
    }
    println!();

    if let Some(name) = initial {
        println!("  {MAGENTA}▸{RESET} Initial galaxy {BOLD}{}{RESET}", name);
    }
    match session_log {
        Some(path) => println!(
            "  {MAGENTA}▸{RESET} Session log {DIM}{}{RESET}",
            path.display()
        ),
        None if config.features.selection_log => {
            println!("  {MAGENTA}▸{RESET} Session log {RED}unavailable{RESET}")
        }
        None => {}
    }
    println!();
}

/// Same information, sent through tracing for the logs panel
pub fn log_startup(datasets: &[LoadStatus], initial: Option<&str>) {
    tracing::info!("═══════════════════════════════");
    tracing::info!("  FIREnet Explorer v{}", VERSION);
    tracing::info!("═══════════════════════════════");

    for status in datasets {
        match &status.result {
            Ok(rows) => tracing::info!("  ✓ {} - {} galaxies", status.name, rows),
            Err(e) => tracing::warn!("  ✗ {} - {}", status.name, e),
        }
        for note in &status.notes {
            tracing::info!("    · {}", note);
        }
    }

    if let Some(name) = initial {
        tracing::info!("▸ Initial galaxy {}", name);
    }
    tracing::info!("Ready. Click a point or press / to search.");
}
