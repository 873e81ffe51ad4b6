//! Dracula theme
//! https://draculatheme.com/

use ratatui::style::Color;
use crate::theme::Theme;

/// Dracula default theme
pub fn default() -> Theme {
    Theme {
        background: Color::Rgb(0x28, 0x2a, 0x36), // Background
        tile: Color::Rgb(0x44, 0x47, 0x5a),       // Current Line
        tile_text: Color::Rgb(0xf8, 0xf8, 0xf2),  // Foreground
        tile_dim: Color::Rgb(0x62, 0x72, 0xa4),   // Comment
        selection: Color::Rgb(0xff, 0x79, 0xc6),  // Pink
        month: Color::Rgb(0xbd, 0x93, 0xf9),      // Purple
        status_bg: Color::Rgb(0x21, 0x22, 0x2c),
        status_fg: Color::Rgb(0xe9, 0xe9, 0xea),
        accent: Color::Rgb(0x8b, 0xe9, 0xfd),     // Cyan
    }
}
