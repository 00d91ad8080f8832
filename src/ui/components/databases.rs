use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};

use duckboard_app::focused_pane::FocusedPane;
use duckboard_app::state::AppState;
use duckboard_domain::{Database, MetadataState};

use super::atoms::{panel_block, spinner_char};
use super::text_utils::truncate_to_width;
use crate::theme::Theme;

pub struct DatabasesPane;

impl DatabasesPane {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState, time_ms: u128) {
        let focused = state.ui.focused_pane == FocusedPane::Databases;
        let title = format!(" Databases [{}] ", state.databases.len());
        let block = panel_block(title, focused, false);
        let content_width = block.inner(area).width.saturating_sub(2) as usize;

        if state.databases.is_empty() {
            let hint = ListItem::new(Span::styled(
                "No database. :open <path>",
                Style::default().fg(Theme::TEXT_MUTED),
            ));
            frame.render_widget(List::new(vec![hint]).block(block), area);
            return;
        }

        let items: Vec<ListItem> = state
            .databases
            .list()
            .iter()
            .map(|db| ListItem::new(database_line(db, content_width, time_ms)))
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
        list_state.select(Some(state.ui.database_selected));
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}

fn database_line(db: &Database, width: usize, time_ms: u128) -> Line<'static> {
    let (status, color) = match &db.tables_state {
        MetadataState::Loaded => (format!("{} tables", db.tables.len()), Theme::TEXT_SECONDARY),
        MetadataState::Loading => (format!("{} loading", spinner_char(time_ms)), Theme::STATUS_LOADING),
        MetadataState::Error(_) => ("error".to_string(), Theme::STATUS_ERROR),
        MetadataState::NotLoaded => ("-".to_string(), Theme::TEXT_MUTED),
    };
    let name_width = width.saturating_sub(status.chars().count() + 1);

    Line::from(vec![
        Span::raw(truncate_to_width(db.display_name(), name_width)),
        Span::raw(" "),
        Span::styled(status, Style::default().fg(color)),
    ])
}
