//! Navigation sub-reducer: focus and selection.

use std::time::Instant;

use crate::action::Action;
use crate::effect::Effect;
use crate::input_mode::InputMode;
use crate::state::AppState;

pub fn reduce_navigation(
    state: &mut AppState,
    action: &Action,
    _now: Instant,
) -> Option<Vec<Effect>> {
    match action {
        Action::ToggleFocus => {
            state.ui.focused_pane = state.ui.focused_pane.next();
            Some(vec![])
        }
        Action::SelectNext => {
            let len = state.pane_len(state.ui.focused_pane);
            state.ui.move_selection(1, len);
            Some(vec![])
        }
        Action::SelectPrevious => {
            let len = state.pane_len(state.ui.focused_pane);
            state.ui.move_selection(-1, len);
            Some(vec![])
        }
        Action::Escape => {
            if state.ui.input_mode == InputMode::CommandLine {
                state.ui.input_mode = InputMode::Normal;
                state.ui.command_line_input.clear();
            } else {
                state.messages.clear();
            }
            Some(vec![])
        }
        _ => None,
    }
}
