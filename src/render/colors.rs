//! Color handling for grid painting.
//!
//! Colors are carried as RGB triples and converted to CSS strings only at the
//! surface boundary. Configuration files spell them as `#RRGGBB`.

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// RGB color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from a hex string (with or without #).
    /// Returns None if the format is invalid.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Convert to CSS hex string (#RRGGBB).
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Darken the color by blending with black.
    /// Factor of 0.0 = no change, 1.0 = pure black.
    pub fn darken(self, factor: f64) -> Self {
        Self {
            r: Self::blend_component(self.r, 0, factor),
            g: Self::blend_component(self.g, 0, factor),
            b: Self::blend_component(self.b, 0, factor),
        }
    }

    /// Blend a single color component toward a target.
    /// Clamped to [0, 255] before the cast.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn blend_component(from: u8, to: u8, factor: f64) -> u8 {
        let from = f64::from(from);
        let to = f64::from(to);
        let blended = from + (to - from) * factor.clamp(0.0, 1.0);
        blended.clamp(0.0, 255.0).round() as u8
    }
}

impl Default for Color {
    fn default() -> Self {
        palette::BLACK
    }
}

impl TryFrom<String> for Color {
    type Error = GridError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s).ok_or(GridError::InvalidColor(s))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

/// Default colors used by the grid.
pub mod palette {
    use super::Color;

    pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);

    /// Grid line color (light gray)
    pub const GRID_LINE: Color = Color::new(0xC3, 0xC3, 0xC3);

    /// Selected row background
    pub const SELECTION: Color = Color::new(0xCF, 0xD8, 0xE8);

    /// Cursor cell marker
    pub const MARKER: Color = Color::new(0x42, 0x85, 0xF4);

    /// Caption (column title) background
    pub const CAPTION_BG: Color = Color::new(0xF3, 0xF3, 0xF3);

    /// Cell text color
    pub const TEXT: Color = Color::new(0x20, 0x21, 0x24);
}
