use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{List, ListItem, ListState};

use duckboard_app::focused_pane::FocusedPane;
use duckboard_app::state::AppState;

use super::atoms::panel_block;
use super::text_utils::truncate_to_width;
use crate::theme::Theme;

pub struct HistoryPane;

impl HistoryPane {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let focused = state.ui.focused_pane == FocusedPane::History;
        let title = format!(" History [{}/{}] ", state.history.len(), state.history.limit());
        let block = panel_block(title, focused, false);
        let content_width = block.inner(area).width.saturating_sub(2) as usize;

        if state.history.is_empty() {
            let hint = ListItem::new(Span::styled(
                "No queries yet",
                Style::default().fg(Theme::TEXT_MUTED),
            ));
            frame.render_widget(List::new(vec![hint]).block(block), area);
            return;
        }

        // Statements are shown on one line each.
        let items: Vec<ListItem> = state
            .history
            .iter()
            .map(|sql| {
                let flat = sql.split_whitespace().collect::<Vec<_>>().join(" ");
                ListItem::new(truncate_to_width(&flat, content_width))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = ListState::default();
        if focused {
            list_state.select(Some(state.ui.history_selected));
        }
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
