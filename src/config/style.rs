//! Marker style configuration

use crate::palette::Rgb;
use crate::selection::style::{HighlightStyle, ViewStyle};
use serde::Deserialize;

/// Highlight and default marker styling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleConfig {
    pub highlight_color: Rgb,
    pub highlight_opacity: f64,
    pub highlight_size: f64,
    pub default_opacity: f64,
    pub default_size: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let view = ViewStyle::default();
        Self {
            highlight_color: view.highlight.color,
            highlight_opacity: view.highlight.opacity,
            highlight_size: view.highlight.size,
            default_opacity: view.default_opacity,
            default_size: view.default_size,
        }
    }
}

/// Style settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileStyle {
    pub highlight_color: Option<String>,
    pub highlight_opacity: Option<f64>,
    pub highlight_size: Option<f64>,
    pub default_opacity: Option<f64>,
    pub default_size: Option<f64>,
}

impl StyleConfig {
    /// Create from file config with defaults.
    ///
    /// Unparsable colors fall back to the default highlight; opacities are
    /// clamped to `[0, 1]`.
    pub fn from_file(file: Option<FileStyle>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let highlight_color = match file.highlight_color {
            Some(hex) => Rgb::from_hex(&hex).unwrap_or_else(|| {
                eprintln!(
                    "Warning: invalid highlight_color '{}', using {}",
                    hex, defaults.highlight_color
                );
                defaults.highlight_color
            }),
            None => defaults.highlight_color,
        };

        Self {
            highlight_color,
            highlight_opacity: file
                .highlight_opacity
                .unwrap_or(defaults.highlight_opacity)
                .clamp(0.0, 1.0),
            highlight_size: file.highlight_size.unwrap_or(defaults.highlight_size),
            default_opacity: file
                .default_opacity
                .unwrap_or(defaults.default_opacity)
                .clamp(0.0, 1.0),
            default_size: file.default_size.unwrap_or(defaults.default_size),
        }
    }

    /// Styling handed to the view builders
    pub fn view_style(&self) -> ViewStyle {
        ViewStyle {
            highlight: HighlightStyle {
                color: self.highlight_color,
                opacity: self.highlight_opacity,
                size: self.highlight_size,
            },
            default_opacity: self.default_opacity,
            default_size: self.default_size,
        }
    }
}
