use ratatui::style::Color;

/// Runtime theme for the strip
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub tile: Color,
    pub tile_text: Color,
    /// Tiles away from the selection frame
    pub tile_dim: Color,
    pub selection: Color,
    pub month: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        crate::themes::gruvbox::dark()
    }
}
