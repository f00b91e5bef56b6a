//! Configuration for the explorer
//!
//! Configuration is loaded in order of precedence:
//! 1. Command-line flags (applied by `main` on top of the result)
//! 2. Environment variables
//! 3. Config file (~/.config/firenet-explorer/config.toml)
//! 4. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod data;
mod features;
mod observability;
mod serialization;
mod style;


pub use data::{DataConfig, FileData};
pub use features::{Features, FileFeatures};
pub use observability::{FileLogging, LogRotation, LoggingConfig};
pub use style::{FileStyle, StyleConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_THEME: &str = "Dark";
const DEFAULT_SESSION_LOG_DIR: &str = "./logs";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the datasets come from and what to select first
    pub data: DataConfig,

    /// Marker styling for the scatter views
    pub style: StyleConfig,

    /// Whether to run the TUI (false = headless, logs to stderr)
    pub enable_tui: bool,

    /// Theme name: "Dark", "Light", "Nord", "Dracula"
    pub theme: String,

    /// Directory for selection session logs
    pub session_log_dir: PathBuf,

    /// Feature flags for optional modules
    pub features: Features,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            style: StyleConfig::default(),
            enable_tui: true,
            theme: DEFAULT_THEME.to_string(),
            session_log_dir: PathBuf::from(DEFAULT_SESSION_LOG_DIR),
            features: Features::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,
    pub session_log_dir: Option<String>,

    /// Optional [data] section
    pub data: Option<FileData>,

    /// Optional [style] section
    pub style: Option<FileStyle>,

    /// Optional [features] section
    pub features: Option<FileFeatures>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/firenet-explorer/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| {
            p.join(".config")
                .join("firenet-explorer")
                .join("config.toml")
        })
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists.
    ///
    /// A config file that exists but cannot be read or parsed ends the
    /// process with a readable message instead of silently using defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Invalid boolean values (use true/false)");
                    eprintln!("    - Numbers written as strings");
                    eprintln!("    - Typos in section names\n");
                    eprintln!("  To reset, run `firenet-explorer config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Self {
        Self::resolve(Self::load_file_config(), |name| std::env::var(name).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        // Theme: env > file > default
        let theme = env("FIRENET_THEME")
            .or(file.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        // Session log directory: env > file > default
        let session_log_dir = env("FIRENET_LOG_DIR")
            .or(file.session_log_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_LOG_DIR));

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("FIRENET_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        let mut data = DataConfig::from_file(file.data);
        if let Some(sed) = env("FIRENET_SED_SOURCE") {
            data.sed_source = sed;
        }
        if let Some(unc) = env("FIRENET_UNCERTAINTY_SOURCE") {
            data.uncertainty_source = unc;
        }
        if let Some(galaxy) = env("FIRENET_GALAXY") {
            data.default_galaxy = galaxy;
        }

        Self {
            data,
            style: StyleConfig::from_file(file.style),
            enable_tui,
            theme,
            session_log_dir,
            features: Features::from_file(file.features),
            logging: LoggingConfig::from_file(file.logging),
        }
    }
}
