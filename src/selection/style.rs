//! Per-row marker styling and the highlight overlay
//!
//! A view keeps one `StyleChannels` snapshot of its defaults per bound trace.
//! Highlighting always starts from a fresh copy of that snapshot, so moving
//! the selection never leaves residue behind.

use super::EntityKey;
use crate::palette::Rgb;
use serde::Serialize;

/// The fixed override applied to the selected entity's points
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HighlightStyle {
    pub color: Rgb,
    pub opacity: f64,
    pub size: f64,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            color: Rgb(0xf7, 0x6d, 0x16),
            opacity: 1.0,
            size: 8.0,
        }
    }
}

/// Marker styling shared by every scatter view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewStyle {
    pub highlight: HighlightStyle,
    pub default_opacity: f64,
    pub default_size: f64,
}

impl Default for ViewStyle {
    fn default() -> Self {
        Self {
            highlight: HighlightStyle::default(),
            default_opacity: 0.3,
            default_size: 6.0,
        }
    }
}

impl ViewStyle {
    /// Default channels for rows colored by a scalar through the palette
    pub fn defaults_for(&self, scalars: &[f64]) -> StyleChannels {
        StyleChannels::uniform(
            crate::palette::scalar_colors(scalars),
            self.default_opacity,
            self.default_size,
        )
    }
}

/// Style of a single marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub color: Rgb,
    pub opacity: f64,
    pub size: f64,
}

/// The three restylable marker channels, one slot per row
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyleChannels {
    pub color: Vec<Rgb>,
    pub opacity: Vec<f64>,
    pub size: Vec<f64>,
}

impl StyleChannels {
    /// Per-row colors with a shared opacity and size
    pub fn uniform(colors: Vec<Rgb>, opacity: f64, size: f64) -> Self {
        let n = colors.len();
        Self {
            color: colors,
            opacity: vec![opacity; n],
            size: vec![size; n],
        }
    }

    pub fn len(&self) -> usize {
        self.color.len()
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<MarkerStyle> {
        Some(MarkerStyle {
            color: *self.color.get(row)?,
            opacity: *self.opacity.get(row)?,
            size: *self.size.get(row)?,
        })
    }

    fn set(&mut self, row: usize, style: &HighlightStyle) {
        self.color[row] = style.color;
        self.opacity[row] = style.opacity;
        self.size[row] = style.size;
    }

    /// Copy these defaults and overwrite every row whose key equals `key`.
    ///
    /// Returns the restyled channels and how many rows matched. `keys` must
    /// have one entry per row; rows beyond the shorter of the two are left
    /// untouched.
    pub fn with_highlight(
        &self,
        keys: &[EntityKey],
        key: &EntityKey,
        style: &HighlightStyle,
    ) -> (StyleChannels, usize) {
        let mut styled = self.clone();
        let mut matched = 0;
        for (row, row_key) in keys.iter().enumerate().take(self.len()) {
            if row_key == key {
                styled.set(row, style);
                matched += 1;
            }
        }
        (styled, matched)
    }
}
