//! Pure reducer: state transitions only, no I/O.
//!
//! # Purity Rules
//!
//! The reducer MUST NOT:
//! - Call `Instant::now()` (time is passed as `now` parameter)
//! - Perform I/O operations
//! - Spawn async tasks
//!
//! After every sub-reducer step the panel registry's change notices are fed
//! through the orchestrator, so query effects always follow the mutation that
//! caused them.

use std::time::Instant;

use crate::action::Action;
use crate::effect::Effect;
use crate::orchestrator::process_events;
use crate::reducers::{
    reduce_command_line, reduce_database, reduce_navigation, reduce_panel, reduce_query,
};
use crate::state::AppState;

pub fn reduce(state: &mut AppState, action: Action, now: Instant) -> Vec<Effect> {
    let should_mark_dirty = !matches!(action, Action::None | Action::Render);

    let mut effects = reduce_inner(state, action, now);
    effects.extend(process_events(state, now));

    if should_mark_dirty {
        state.mark_dirty();
    }

    effects
}

fn reduce_inner(state: &mut AppState, action: Action, now: Instant) -> Vec<Effect> {
    if let Some(effects) = reduce_command_line(state, &action, now) {
        return effects;
    }
    if let Some(effects) = reduce_navigation(state, &action, now) {
        return effects;
    }
    if let Some(effects) = reduce_database(state, &action, now) {
        return effects;
    }
    if let Some(effects) = reduce_panel(state, &action, now) {
        return effects;
    }
    if let Some(effects) = reduce_query(state, &action, now) {
        return effects;
    }

    match action {
        Action::Quit => {
            state.should_quit = true;
            vec![]
        }
        Action::Resize(_w, h) => {
            state.ui.terminal_height = h;
            vec![]
        }
        Action::Render => {
            state.clear_expired_timers(now);
            state.clear_dirty();
            vec![Effect::Render]
        }
        _ => vec![],
    }
}
