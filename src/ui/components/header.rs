use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use duckboard_app::state::AppState;

use crate::theme::Theme;

pub struct Header;

impl Header {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let loading = state.panels.list().iter().filter(|p| p.is_loading()).count();

        let mut spans = vec![
            Span::styled(
                "duckboard",
                Style::default()
                    .fg(Theme::TEXT_ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::raw(format!("{} database(s)", state.databases.len())),
            Span::raw(" | "),
            Span::raw(format!("{} panel(s)", state.panels.len())),
        ];
        if loading > 0 {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("{loading} loading"),
                Style::default().fg(Theme::STATUS_LOADING),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
