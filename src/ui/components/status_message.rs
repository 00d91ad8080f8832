use ratatui::style::Style;
use ratatui::text::{Line, Span};

use duckboard_app::message_state::MessageLevel;

use crate::theme::Theme;

pub struct StatusMessage;

impl StatusMessage {
    pub fn render_line(message: &str, level: MessageLevel) -> Line<'static> {
        let color = match level {
            MessageLevel::Error => Theme::STATUS_ERROR,
            MessageLevel::Success => Theme::STATUS_OK,
        };

        Line::from(Span::styled(message.to_string(), Style::default().fg(color)))
    }
}
