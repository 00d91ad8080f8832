//! Query sub-reducer: debounce deadlines and completions.

use std::time::Instant;

use crate::action::Action;
use crate::effect::Effect;
use crate::orchestrator::{apply_completion, dispatch_due};
use crate::state::AppState;

pub fn reduce_query(state: &mut AppState, action: &Action, now: Instant) -> Option<Vec<Effect>> {
    match action {
        Action::DispatchDueQueries => Some(dispatch_due(state, now)),
        Action::QueryCompleted {
            panel_id,
            generation,
            database_path,
            sql,
            outcome,
        } => Some(apply_completion(
            state,
            panel_id,
            *generation,
            database_path,
            sql,
            outcome.clone(),
        )),
        _ => None,
    }
}
