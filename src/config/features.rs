//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for optional modules
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    /// Write every selection to a JSONL session log
    pub selection_log: bool,

    /// Show the logs panel when the TUI starts
    pub logs_panel: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            selection_log: true,
            logs_panel: false,
        }
    }
}

/// Feature flags as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileFeatures {
    pub selection_log: Option<bool>,
    pub logs_panel: Option<bool>,
}

impl Features {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileFeatures>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            selection_log: file.selection_log.unwrap_or(defaults.selection_log),
            logs_panel: file.logs_panel.unwrap_or(defaults.logs_panel),
        }
    }
}
