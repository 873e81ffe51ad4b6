//! Gruvbox theme
//! https://github.com/morhetz/gruvbox

use ratatui::style::Color;
use crate::theme::Theme;

/// Gruvbox dark (medium contrast)
pub fn dark() -> Theme {
    Theme {
        background: Color::Rgb(0x28, 0x28, 0x28), // bg0
        tile: Color::Rgb(0x45, 0x40, 0x3d),       // bg2
        tile_text: Color::Rgb(0xd4, 0xbe, 0x98),  // fg0
        tile_dim: Color::Rgb(0x92, 0x83, 0x74),   // grey1
        selection: Color::Rgb(0xd8, 0xa6, 0x57),  // yellow
        month: Color::Rgb(0xdd, 0xc7, 0xa1),      // fg1
        status_bg: Color::Rgb(0x32, 0x30, 0x2f),  // bg1
        status_fg: Color::Rgb(0xa8, 0x99, 0x84),  // grey2
        accent: Color::Rgb(0x89, 0xb4, 0x82),     // aqua
    }
}

/// Gruvbox light (medium contrast)
pub fn light() -> Theme {
    Theme {
        background: Color::Rgb(0xfb, 0xf1, 0xc7),
        tile: Color::Rgb(0xeb, 0xdb, 0xb2),
        tile_text: Color::Rgb(0x3c, 0x38, 0x36),
        tile_dim: Color::Rgb(0x92, 0x83, 0x74),
        selection: Color::Rgb(0xb5, 0x76, 0x14),
        month: Color::Rgb(0x50, 0x49, 0x45),
        status_bg: Color::Rgb(0xf2, 0xe5, 0xbc),
        status_fg: Color::Rgb(0x7c, 0x6f, 0x64),
        accent: Color::Rgb(0x42, 0x7b, 0x58),
    }
}
