use std::time::{SystemTime, UNIX_EPOCH};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use duckboard_app::state::AppState;

use super::command_line::CommandLine;
use super::databases::DatabasesPane;
use super::footer::Footer;
use super::header::Header;
use super::history::HistoryPane;
use super::panels::PanelsPane;

pub struct MainLayout;

impl MainLayout {
    /// `time_ms` pins the spinner frame; `None` uses the wall clock.
    pub fn render(frame: &mut Frame, state: &AppState, time_ms: Option<u128>) {
        let time_ms = time_ms.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0)
        });
        let area = frame.area();

        let [header_area, main_area, footer_area, cmdline_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        Header::render(frame, header_area, state);

        let [left_area, right_area] =
            Layout::horizontal([Constraint::Percentage(30), Constraint::Percentage(70)])
                .areas(main_area);

        let [databases_area, history_area] =
            Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(left_area);

        DatabasesPane::render(frame, databases_area, state, time_ms);
        HistoryPane::render(frame, history_area, state);
        PanelsPane::render(frame, right_area, state, time_ms);

        Footer::render(frame, footer_area, state);
        CommandLine::render(frame, cmdline_area, state);
    }
}
