use ratatui::style::Color;

pub struct Theme;

impl Theme {
    pub const FOCUS_BORDER: Color = Color::Cyan;
    pub const UNFOCUS_BORDER: Color = Color::DarkGray;
    pub const SELECTED_BORDER: Color = Color::Yellow;

    pub const TEXT_ACCENT: Color = Color::Cyan;
    pub const TEXT_SECONDARY: Color = Color::Gray;
    pub const TEXT_MUTED: Color = Color::DarkGray;

    pub const STATUS_OK: Color = Color::Green;
    pub const STATUS_LOADING: Color = Color::Yellow;
    pub const STATUS_ERROR: Color = Color::Red;

    pub const TABLE_HEADER_BG: Color = Color::Rgb(0x2a, 0x2a, 0x2e);
}
