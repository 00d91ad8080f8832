use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use duckboard_app::focused_pane::FocusedPane;
use duckboard_app::input_mode::InputMode;
use duckboard_app::state::AppState;

use super::atoms::key_text;
use super::status_message::StatusMessage;
use crate::theme::Theme;

const COMMAND_LINE_HINTS: &[(&str, &str)] = &[("Enter", "Run"), ("Esc", "Cancel")];

pub struct Footer;

impl Footer {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let line = match state.messages.current() {
            Some((level, message)) => StatusMessage::render_line(message, level),
            None => hint_line(&Self::context_hints(state)),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Hint ordering: actions, then navigation, then quit.
    fn context_hints(state: &AppState) -> Vec<(&'static str, &'static str)> {
        if state.ui.input_mode == InputMode::CommandLine {
            return COMMAND_LINE_HINTS.to_vec();
        }

        let mut hints = vec![(":", "Command"), ("a", "Add")];
        match state.ui.focused_pane {
            FocusedPane::Databases => {
                hints.push(("d", "Close"));
                hints.push(("r", "Refresh"));
            }
            FocusedPane::Panels => {
                hints.push(("d", "Remove"));
                hints.push(("r", "Re-run"));
            }
            FocusedPane::History => {}
        }
        hints.push(("j/k", "Select"));
        hints.push(("Tab", "Focus"));
        hints.push(("q", "Quit"));
        hints
    }
}

fn hint_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::new();

    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(key_text(key));
        spans.push(Span::styled(
            format!(" {desc}"),
            Style::default().fg(Theme::TEXT_SECONDARY),
        ));
    }

    Line::from(spans)
}
