//! Dashboard colours (Tokyo Night).

use neuronek_core::Rgb;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub title: Color,
    pub axis: Color,
    pub label: Color,
    pub grid: Color,
    pub highlight: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(0x1a, 0x1b, 0x26),
            foreground: Color::Rgb(0xa9, 0xb1, 0xd6),
            title: Color::Rgb(0x7a, 0xa2, 0xf7),
            axis: Color::Rgb(0x56, 0x5f, 0x89),
            label: Color::Rgb(0x56, 0x5f, 0x89),
            grid: Color::Rgb(0x3b, 0x42, 0x61),
            highlight: Color::Rgb(0x29, 0x2e, 0x42),
            error: Color::Rgb(0xf7, 0x76, 0x8e),
        }
    }
}

/// Terminal colour for a substance.
pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}
