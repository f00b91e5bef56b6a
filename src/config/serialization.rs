//! Config serialization to TOML
//!
//! Single source of truth for the config file format. `config --show` and
//! the first-run template both come from here.

use super::Config;

/// Quote a string for TOML (paths on Windows contain backslashes)
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

impl Config {
    pub fn to_toml(&self) -> String {
        let properties: Vec<String> = self.data.properties.iter().map(|p| quoted(p)).collect();

        format!(
            r#"# firenet-explorer configuration

# Theme: Dark, Light, Nord, Dracula
theme = {theme}

# Directory for selection session logs
session_log_dir = {session_dir}

# Datasets: local paths or http(s) URLs
[data]
sed_source = {sed}
uncertainty_source = {unc}
default_galaxy = {galaxy}
# Dust properties shown in the last row of the predicted-vs-true grid
properties = [{properties}]

# Marker styling
[style]
highlight_color = "{hl_color}"
highlight_opacity = {hl_opacity:?}
highlight_size = {hl_size:?}
default_opacity = {opacity:?}
default_size = {size:?}

# Feature flags
[features]
selection_log = {selection_log}
logs_panel = {logs_panel}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# JSON file logging (in addition to TUI buffer or stdout)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            theme = quoted(&self.theme),
            session_dir = quoted(&self.session_log_dir.to_string_lossy()),
            sed = quoted(&self.data.sed_source),
            unc = quoted(&self.data.uncertainty_source),
            galaxy = quoted(&self.data.default_galaxy),
            properties = properties.join(", "),
            hl_color = self.style.highlight_color.to_hex(),
            hl_opacity = self.style.highlight_opacity,
            hl_size = self.style.highlight_size,
            opacity = self.style.default_opacity,
            size = self.style.default_size,
            selection_log = self.features.selection_log,
            logs_panel = self.features.logs_panel,
            log_level = quoted(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted(&self.logging.file_dir.to_string_lossy()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = quoted(&self.logging.file_prefix),
        )
    }
}
