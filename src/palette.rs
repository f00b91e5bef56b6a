// Color handling for chart styling
//
// Marker colors are resolved to concrete RGB values as soon as data is loaded,
// so a highlight can overwrite a single slot without re-running the palette.

use serde::{Serialize, Serializer};
use std::fmt;

/// A concrete 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Parse `#rrggbb` or `rrggbb`
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Linear interpolation between two colors, `t` in [0, 1]
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| -> u8 {
            let v = a as f64 + (b as f64 - a as f64) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb(
            mix(self.0, other.0),
            mix(self.1, other.1),
            mix(self.2, other.2),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl From<Rgb> for ratatui::style::Color {
    fn from(c: Rgb) -> Self {
        ratatui::style::Color::Rgb(c.0, c.1, c.2)
    }
}

/// Inferno control points, sampled every 0.1
const INFERNO: [Rgb; 11] = [
    Rgb(0x00, 0x00, 0x04),
    Rgb(0x16, 0x0b, 0x39),
    Rgb(0x42, 0x0a, 0x68),
    Rgb(0x6a, 0x17, 0x6e),
    Rgb(0x93, 0x26, 0x67),
    Rgb(0xbc, 0x37, 0x54),
    Rgb(0xdd, 0x51, 0x3a),
    Rgb(0xf3, 0x78, 0x19),
    Rgb(0xfc, 0xa5, 0x0a),
    Rgb(0xf6, 0xd7, 0x46),
    Rgb(0xfc, 0xff, 0xa4),
];

/// Map a value in [0, 1] onto the Inferno palette.
///
/// Out-of-range values are clamped; NaN maps to the darkest color.
pub fn inferno(t: f64) -> Rgb {
    if t.is_nan() {
        return INFERNO[0];
    }
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (INFERNO.len() - 1) as f64;
    let lo = scaled.floor() as usize;
    if lo >= INFERNO.len() - 1 {
        return INFERNO[INFERNO.len() - 1];
    }
    INFERNO[lo].lerp(INFERNO[lo + 1], scaled - lo as f64)
}

/// Turn a continuous scalar per point into palette colors.
///
/// Values are normalized by the maximum, so the densest point gets the
/// brightest color.
pub fn scalar_colors(values: &[f64]) -> Vec<Rgb> {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);

    if !max.is_finite() || max <= 0.0 {
        return vec![inferno(0.0); values.len()];
    }

    values.iter().map(|v| inferno(v / max)).collect()
}
