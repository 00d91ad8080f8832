//! Pure functions for calculating wake-up deadlines.
//!
//! The main loop sleeps until the earliest of these; nothing here does I/O.

use std::time::{Duration, Instant};

use duckboard_domain::MetadataState;

use crate::state::AppState;

/// Spinner frame interval (~6.7 FPS)
const SPINNER_INTERVAL: Duration = Duration::from_millis(150);

/// Next instant the screen must be redrawn without any input.
///
/// Sources: the spinner while any panel or table list is loading, and the
/// expiry of the footer message.
pub fn next_animation_deadline(state: &AppState, now: Instant) -> Option<Instant> {
    let spinner = has_active_spinner(state).then(|| now + SPINNER_INTERVAL);
    min_instant(spinner, state.messages.expires_at)
}

fn has_active_spinner(state: &AppState) -> bool {
    state.panels.list().iter().any(|p| p.is_loading())
        || state
            .databases
            .list()
            .iter()
            .any(|db| db.tables_state == MetadataState::Loading)
}

fn min_instant(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
