use ratatui::style::Color;

/// Color configuration for the composer surface.
#[derive(Clone, Debug)]
pub struct Theme {
    /// Foreground (text) color for the status bar
    pub status_bar_fg: Color,

    /// Background color for the status bar
    pub status_bar_bg: Color,

    /// Foreground color for active selection
    pub selection_fg: Color,

    /// Background color for active selection
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            status_bar_fg: Color::Black,
            status_bar_bg: Color::Gray,
            selection_fg: Color::Black,
            selection_bg: Color::LightBlue,
        }
    }
}
