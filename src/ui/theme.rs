use ratatui::style::Color;

/// Unified color theme for the application
pub struct Theme;

impl Theme {
    /// Primary branding color
    pub fn primary() -> Color {
        Color::Yellow
    }

    /// Secondary/border color
    pub fn secondary() -> Color {
        Color::Cyan
    }

    /// Today marker
    pub fn today() -> Color {
        Color::LightGreen
    }

    /// Warning/destructive prompts
    pub fn warn() -> Color {
        Color::LightRed
    }

    /// Selection/highlight
    pub fn highlight() -> Color {
        Color::Cyan
    }

    /// Text drawn on top of crew-coloured bars
    pub fn on_bar() -> Color {
        Color::Black
    }

    /// Dimmed/inactive text, days outside the month, weekends
    pub fn dim() -> Color {
        Color::DarkGray
    }

    /// Normal text
    pub fn text() -> Color {
        Color::White
    }

    /// Accent for titles and counts
    pub fn accent() -> Color {
        Color::LightBlue
    }
}
