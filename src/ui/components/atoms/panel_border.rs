use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use crate::theme::Theme;

/// Bordered block; `focused` wins over `selected`.
pub fn panel_block(title: String, focused: bool, selected: bool) -> Block<'static> {
    let color = if focused {
        Theme::FOCUS_BORDER
    } else if selected {
        Theme::SELECTED_BORDER
    } else {
        Theme::UNFOCUS_BORDER
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}
