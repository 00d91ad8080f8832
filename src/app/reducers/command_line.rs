//! Command line sub-reducer: editing and submitting `:` commands.

use std::time::Instant;

use crate::action::Action;
use crate::command::{command_to_action, parse_command};
use crate::effect::Effect;
use crate::input_mode::InputMode;
use crate::state::AppState;

pub fn reduce_command_line(
    state: &mut AppState,
    action: &Action,
    now: Instant,
) -> Option<Vec<Effect>> {
    match action {
        Action::EnterCommandLine => {
            state.ui.input_mode = InputMode::CommandLine;
            state.ui.command_line_input.clear();
            Some(vec![])
        }
        Action::ExitCommandLine => {
            state.ui.input_mode = InputMode::Normal;
            state.ui.command_line_input.clear();
            Some(vec![])
        }
        Action::CommandLineInput(c) => {
            state.ui.command_line_input.push(*c);
            Some(vec![])
        }
        Action::CommandLineBackspace => {
            state.ui.command_line_input.pop();
            Some(vec![])
        }
        Action::CommandLineSubmit => {
            let input = std::mem::take(&mut state.ui.command_line_input);
            state.ui.input_mode = InputMode::Normal;
            if input.trim().is_empty() {
                return Some(vec![]);
            }

            match command_to_action(parse_command(&input), state) {
                Ok(action) => Some(vec![Effect::DispatchActions(vec![action])]),
                Err(msg) => {
                    state.set_error(msg, now);
                    Some(vec![])
                }
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn submit(state: &mut AppState, input: &str) -> Option<Vec<Effect>> {
        reduce_command_line(state, &Action::EnterCommandLine, Instant::now());
        for c in input.chars() {
            reduce_command_line(state, &Action::CommandLineInput(c), Instant::now());
        }
        reduce_command_line(state, &Action::CommandLineSubmit, Instant::now())
    }

    #[test]
    fn typing_and_backspace_edit_input() {
        let mut state = AppState::new(&AppConfig::default());
        state.ui.input_mode = InputMode::CommandLine;

        for c in "opex".chars() {
            reduce_command_line(&mut state, &Action::CommandLineInput(c), Instant::now());
        }
        reduce_command_line(&mut state, &Action::CommandLineBackspace, Instant::now());

        assert_eq!(state.ui.command_line_input, "ope");
    }

    #[test]
    fn submit_dispatches_parsed_action() {
        let mut state = AppState::new(&AppConfig::default());

        let effects = submit(&mut state, "open /a.duckdb");

        assert_eq!(
            effects,
            Some(vec![Effect::DispatchActions(vec![Action::OpenDatabase(
                "/a.duckdb".to_string()
            )])])
        );
        assert_eq!(state.ui.input_mode, InputMode::Normal);
        assert!(state.ui.command_line_input.is_empty());
    }

    #[test]
    fn submit_error_is_shown_in_footer() {
        let mut state = AppState::new(&AppConfig::default());

        let effects = submit(&mut state, "bind /a.duckdb");

        assert_eq!(effects, Some(vec![]));
        assert_eq!(
            state.messages.last_error.as_deref(),
            Some("No panel selected")
        );
    }

    #[test]
    fn empty_submit_does_nothing() {
        let mut state = AppState::new(&AppConfig::default());

        let effects = submit(&mut state, "   ");

        assert_eq!(effects, Some(vec![]));
        assert!(state.messages.current().is_none());
    }
}
