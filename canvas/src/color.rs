//! Color token resolution.
//!
//! Wire events carry colors as opaque CSS-ish tokens (`"blue"`, `"#1f1a17"`).
//! This module resolves them to packed RGBA pixels. Unknown tokens resolve to
//! black; the rendering surface never rejects a color.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use strokes::ColorToken;

/// A packed RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Canvas background and eraser color.
pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

/// Fallback for unknown color tokens.
pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

impl Rgba {
    /// An opaque color from 8-bit channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Resolve a wire color token: a named color from the toolbar palette or
    /// a `#rgb` / `#rrggbb` hex literal. Unknown tokens resolve to black.
    #[must_use]
    pub fn from_token(token: &ColorToken) -> Self {
        let text = token.as_str().trim();
        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex).unwrap_or(BLACK);
        }

        match text.to_ascii_lowercase().as_str() {
            "white" => WHITE,
            "black" => BLACK,
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "orange" => Self::rgb(255, 165, 0),
            "purple" => Self::rgb(128, 0, 128),
            "pink" => Self::rgb(255, 192, 203),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            _ => BLACK,
        }
    }
}

/// Parse a 3- or 6-digit hex color body (no leading `#`).
fn parse_hex(hex: &str) -> Option<Rgba> {
    match hex.len() {
        3 => {
            let mut channels = [0u8; 3];
            for (i, ch) in hex.chars().enumerate() {
                // to_digit(16) yields 0..=15, which always fits a u8.
                let nibble = u8::try_from(ch.to_digit(16)?).unwrap_or(0);
                channels[i] = nibble * 0x11;
            }
            Some(Rgba::rgb(channels[0], channels[1], channels[2]))
        }
        6 => {
            let Ok(r) = u8::from_str_radix(hex.get(0..2)?, 16) else { return None };
            let Ok(g) = u8::from_str_radix(hex.get(2..4)?, 16) else { return None };
            let Ok(b) = u8::from_str_radix(hex.get(4..6)?, 16) else { return None };
            Some(Rgba::rgb(r, g, b))
        }
        _ => None,
    }
}
