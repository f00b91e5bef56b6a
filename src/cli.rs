// CLI module - command-line argument parsing and handlers
//
// Without a subcommand the explorer starts (TUI or headless). Subcommands:
// - list: print every galaxy name
// - select <name>: headless selection, prints what each view shows
// - config --show | --reset | --path

use crate::config::{Config, VERSION};
use crate::explorer::{Datasets, Explorer};
use crate::selection::EntityKey;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;

/// FIREnet galaxy explorer - linked SED and prediction views in the terminal
#[derive(Parser, Debug)]
#[command(name = "firenet-explorer")]
#[command(version = VERSION)]
#[command(about = "Explore FIREnet SED predictions in the terminal", long_about = None)]
pub struct Cli {
    /// SED table (path or http(s) URL)
    #[arg(long, global = true)]
    pub sed: Option<String>,

    /// Uncertainty-validation table (path or http(s) URL)
    #[arg(long, global = true)]
    pub uncertainty: Option<String>,

    /// Galaxy selected at startup
    #[arg(long)]
    pub galaxy: Option<String>,

    /// Run without the TUI (logs to stderr)
    #[arg(long)]
    pub no_tui: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all galaxy names
    List,

    /// Select a galaxy without the TUI and print each view's state
    Select {
        /// Galaxy name
        name: String,

        /// Print the selection report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

impl Cli {
    /// Flags win over env vars and the config file
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(sed) = &self.sed {
            config.data.sed_source = sed.clone();
        }
        if let Some(unc) = &self.uncertainty {
            config.data.uncertainty_source = unc.clone();
        }
        if let Some(galaxy) = &self.galaxy {
            config.data.default_galaxy = galaxy.clone();
        }
        if self.no_tui {
            config.enable_tui = false;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Data commands
// ─────────────────────────────────────────────────────────────────────────────

pub async fn run_list(config: &Config) -> Result<()> {
    let datasets = Datasets::load(&config.data).await?;
    let explorer = Explorer::new(
        &datasets,
        &config.style.view_style(),
        &config.data.properties,
        None,
    );

    let mut out = std::io::stdout().lock();
    for name in explorer.names() {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}

pub async fn run_select(config: &Config, name: &str, json: bool) -> Result<()> {
    let datasets = Datasets::load(&config.data).await?;
    let mut explorer = Explorer::new(
        &datasets,
        &config.style.view_style(),
        &config.data.properties,
        None,
    );

    let key = EntityKey::from(name);
    let report = explorer.select(key.clone());

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !explorer.names().contains(&key) {
        eprintln!("Note: '{}' is not in any dataset", name);
    }
    for view in &report.views {
        println!(
            "  {:<12} {:>4} highlighted  {}",
            view.view, view.highlighted_rows, view.title
        );
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Config command
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_config(show: bool, reset: bool, path: bool) {
    if path {
        handle_config_path();
    } else if show {
        handle_config_show();
    } else if reset {
        handle_config_reset();
    } else {
        println!("Usage: firenet-explorer config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}
