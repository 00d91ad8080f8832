use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use duckboard_app::focused_pane::FocusedPane;
use duckboard_app::state::AppState;
use duckboard_domain::{ChartOption, Database, Panel};

use super::atoms::{panel_block, spinner_char};
use super::text_utils::{format_value, pad_to_width};
use crate::theme::Theme;

const MIN_COLUMN_WIDTH: usize = 6;
const MAX_COLUMN_WIDTH: usize = 16;

pub struct PanelsPane;

impl PanelsPane {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState, time_ms: u128) {
        let panels = state.panels.list();

        if panels.is_empty() {
            let focused = state.ui.focused_pane == FocusedPane::Panels;
            let block = panel_block(" Panels ".to_string(), focused, false);
            let hint = Paragraph::new(Line::styled(
                "No panels. Press 'a' or :add <kind>",
                Style::default().fg(Theme::TEXT_MUTED),
            ))
            .block(block);
            frame.render_widget(hint, area);
            return;
        }

        let constraints = vec![Constraint::Ratio(1, panels.len() as u32); panels.len()];
        let areas = Layout::vertical(constraints).split(area);

        for (idx, (panel, panel_area)) in panels.iter().zip(areas.iter()).enumerate() {
            let selected = idx == state.ui.panel_selected;
            let focused = selected && state.ui.focused_pane == FocusedPane::Panels;
            let database = panel
                .bound_database
                .as_deref()
                .and_then(|path| state.databases.get(path));
            render_panel(frame, *panel_area, panel, database, focused, selected, time_ms);
        }
    }
}

fn render_panel(
    frame: &mut Frame,
    area: Rect,
    panel: &Panel,
    database: Option<&Database>,
    focused: bool,
    selected: bool,
    time_ms: u128,
) {
    let title = format!(" {} [{}] ", panel.title, panel.kind);
    let block = panel_block(title, focused, selected);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![summary_line(panel, database)];
    lines.extend(body_lines(panel, inner.width as usize, time_ms));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn summary_line(panel: &Panel, database: Option<&Database>) -> Line<'static> {
    let db_name = database.map_or("-", Database::display_name).to_string();
    let mut spans = vec![
        Span::styled("db: ", Style::default().fg(Theme::TEXT_SECONDARY)),
        Span::raw(db_name),
    ];

    if !panel.filters.is_empty() {
        let filters = panel
            .filters
            .iter()
            .map(|(category, values)| {
                let values: Vec<&str> = values.iter().map(String::as_str).collect();
                format!("{category}={}", values.join(","))
            })
            .collect::<Vec<_>>()
            .join(" ");
        spans.push(Span::styled("  filters: ", Style::default().fg(Theme::TEXT_SECONDARY)));
        spans.push(Span::raw(filters));
    }
    if !panel.breakdown.is_empty() {
        spans.push(Span::styled("  by: ", Style::default().fg(Theme::TEXT_SECONDARY)));
        spans.push(Span::raw(panel.breakdown.join(",")));
    }

    Line::from(spans)
}

fn body_lines(panel: &Panel, width: usize, time_ms: u128) -> Vec<Line<'static>> {
    if panel.is_loading() {
        return vec![Line::styled(
            format!("{} Loading...", spinner_char(time_ms)),
            Style::default().fg(Theme::STATUS_LOADING),
        )];
    }
    if let Some(error) = panel.error() {
        return vec![Line::styled(
            format!("Error: {error}"),
            Style::default().fg(Theme::STATUS_ERROR),
        )];
    }
    if let Some(option) = panel.result() {
        return preview_lines(option, width);
    }
    if panel.bound_database.is_none() {
        return vec![Line::styled(
            "Not bound. :bind <path>",
            Style::default().fg(Theme::TEXT_MUTED),
        )];
    }
    vec![Line::styled("Idle", Style::default().fg(Theme::TEXT_MUTED))]
}

/// Category column followed by one column per series.
pub fn preview_lines(option: &ChartOption, width: usize) -> Vec<Line<'static>> {
    if option.is_empty() {
        return vec![Line::styled("No rows", Style::default().fg(Theme::TEXT_MUTED))];
    }

    let columns = 1 + option.series.len();
    let column_width = (width / columns).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);

    let mut header = pad_to_width(&option.x_label, column_width);
    for series in &option.series {
        header.push_str(&pad_to_width(&series.name, column_width));
    }
    let mut lines = vec![Line::styled(
        header,
        Style::default()
            .bg(Theme::TABLE_HEADER_BG)
            .add_modifier(Modifier::BOLD),
    )];

    for (row, category) in option.categories.iter().enumerate() {
        let mut text = pad_to_width(category, column_width);
        for series in &option.series {
            let value = series.values.get(row).copied().flatten();
            text.push_str(&pad_to_width(&format_value(value), column_width));
        }
        lines.push(Line::raw(text));
    }

    lines
}
