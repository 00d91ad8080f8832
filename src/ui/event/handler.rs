use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use duckboard_app::action::Action;
use duckboard_app::input_mode::InputMode;
use duckboard_app::state::AppState;
use duckboard_domain::ChartKind;

use super::Event;

pub fn handle_event(event: Event, state: &AppState) -> Action {
    match event {
        Event::Init => Action::Render,
        Event::Resize(w, h) => Action::Resize(w, h),
        Event::Key(key) => handle_key_event(key, state),
    }
}

fn handle_key_event(key: KeyEvent, state: &AppState) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match state.ui.input_mode {
        InputMode::Normal => handle_normal_mode(key),
        InputMode::CommandLine => handle_command_line_mode(key),
    }
}

fn handle_normal_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char(':') => Action::EnterCommandLine,
        KeyCode::Tab => Action::ToggleFocus,
        KeyCode::Esc => Action::Escape,

        KeyCode::Up | KeyCode::Char('k') => Action::SelectPrevious,
        KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,

        KeyCode::Char('a') => Action::AddPanel(ChartKind::Default),
        KeyCode::Char('d') => Action::RemoveSelected,
        KeyCode::Char('r') => Action::RefreshSelected,

        _ => Action::None,
    }
}

fn handle_command_line_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::CommandLineSubmit,
        KeyCode::Esc => Action::ExitCommandLine,
        KeyCode::Backspace => Action::CommandLineBackspace,
        KeyCode::Char(c) => Action::CommandLineInput(c),
        _ => Action::None,
    }
}
