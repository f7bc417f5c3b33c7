//! Display colors for loaded sources.
//!
//! Colors are handed out by insertion order from a fixed rotating palette, so the
//! n-th imported log always gets the same color regardless of what was closed since.

use crate::error::{LogscopeError, Result};
use std::fmt;
use std::str::FromStr;

/// Default palette, in assignment order.
pub const DEFAULT_PALETTE: [SourceColor; 8] = [
    SourceColor::rgb(0x4c, 0xaf, 0x50),
    SourceColor::rgb(0x21, 0x96, 0xf3),
    SourceColor::rgb(0xff, 0x98, 0x00),
    SourceColor::rgb(0xe9, 0x1e, 0x63),
    SourceColor::rgb(0x9c, 0x27, 0xb0),
    SourceColor::rgb(0x00, 0xbc, 0xd4),
    SourceColor::rgb(0xff, 0xc1, 0x07),
    SourceColor::rgb(0x8b, 0xc3, 0x4a),
];

/// Color of the synthetic query source.
pub const QUERY_COLOR: SourceColor = SourceColor::rgb(0xff, 0xff, 0xff);

/// 24-bit display color attached to a source and to every line derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SourceColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for SourceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for SourceColor {
    type Err = LogscopeError;

    /// Parse `#rrggbb` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(LogscopeError::config(format!("invalid color: {s}")));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| LogscopeError::config(format!("invalid color: {s}")))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl From<SourceColor> for ratatui::style::Color {
    fn from(color: SourceColor) -> Self {
        ratatui::style::Color::Rgb(color.r, color.g, color.b)
    }
}

/// Rotating color assignment keyed by insertion count.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<SourceColor>,
}

impl Palette {
    /// Build a palette; an empty list falls back to the default colors.
    pub fn new(colors: Vec<SourceColor>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    /// Color for the source imported after `insertion_count` earlier imports.
    pub fn color_for(&self, insertion_count: usize) -> SourceColor {
        self.colors[insertion_count % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_rotates() {
        let palette = Palette::default();
        assert_eq!(palette.color_for(0).to_string(), "#4caf50");
        assert_eq!(palette.color_for(1).to_string(), "#2196f3");
        assert_eq!(palette.color_for(7).to_string(), "#8bc34a");
        assert_eq!(palette.color_for(8), palette.color_for(0));
        assert_eq!(palette.color_for(17), palette.color_for(1));
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let palette = Palette::new(Vec::new());
        assert_eq!(palette.len(), DEFAULT_PALETTE.len());
    }

    #[test]
    fn test_parse_hex() {
        let color: SourceColor = "#ff9800".parse().unwrap();
        assert_eq!(color, SourceColor::rgb(0xff, 0x98, 0x00));
        let bare: SourceColor = "00bcd4".parse().unwrap();
        assert_eq!(bare.to_string(), "#00bcd4");

        assert!("#fff".parse::<SourceColor>().is_err());
        assert!("#gggggg".parse::<SourceColor>().is_err());
    }

    #[test]
    fn test_ratatui_conversion() {
        let color: ratatui::style::Color = QUERY_COLOR.into();
        assert_eq!(color, ratatui::style::Color::Rgb(255, 255, 255));
    }
}
