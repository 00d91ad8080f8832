//! Panel sub-reducer: add, remove, and configuration updates.
//!
//! Query consequences are not decided here; the registry records change
//! notices and `orchestrator::process_events` turns them into effects.

use std::time::Instant;

use tracing::error;

use crate::action::Action;
use crate::effect::Effect;
use crate::error::RegistryError;
use crate::focused_pane::FocusedPane;
use crate::state::AppState;

/// Handles panel lifecycle and configuration actions.
/// Returns Some(effects) if action was handled, None otherwise.
pub fn reduce_panel(state: &mut AppState, action: &Action, now: Instant) -> Option<Vec<Effect>> {
    match action {
        Action::AddPanel(kind) => {
            state.panels.add_panel(*kind);
            state.ui.panel_selected = state.panels.len() - 1;
            state.ui.focused_pane = FocusedPane::Panels;
            Some(vec![])
        }
        Action::RemovePanel(id) => {
            if let Err(e) = state.panels.remove_panel(id) {
                reject(state, e, now);
            }
            state.clamp_selections();
            Some(vec![])
        }
        Action::UpdatePanel { id, patch } => {
            if let Some(path) = patch.bound_path()
                && !state.databases.contains(path)
            {
                reject(state, RegistryError::DatabaseNotFound(path.to_string()), now);
                return Some(vec![]);
            }
            if let Err(e) = state.panels.update_panel(id, patch.clone()) {
                reject(state, e, now);
            }
            Some(vec![])
        }
        Action::ToggleFilter {
            id,
            category,
            value,
        } => {
            if let Err(e) = state.panels.toggle_filter(id, category, value) {
                reject(state, e, now);
            }
            Some(vec![])
        }
        Action::RemoveSelected => match state.ui.focused_pane {
            FocusedPane::Databases => Some(
                state
                    .selected_database()
                    .map(|db| vec![Effect::DispatchActions(vec![Action::CloseDatabase(db.path.clone())])])
                    .unwrap_or_default(),
            ),
            FocusedPane::Panels => Some(
                state
                    .selected_panel()
                    .map(|p| vec![Effect::DispatchActions(vec![Action::RemovePanel(p.id.clone())])])
                    .unwrap_or_default(),
            ),
            FocusedPane::History => Some(vec![]),
        },
        _ => None,
    }
}

fn reject(state: &mut AppState, e: RegistryError, now: Instant) {
    if matches!(e, RegistryError::PanelNotFound(_)) {
        error!(error = %e, "panel action for unknown id");
    }
    state.set_error(e.to_string(), now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use duckboard_domain::{ChartKind, PanelId, PanelPatch};

    fn state() -> AppState {
        AppState::new(&AppConfig::default())
    }

    #[test]
    fn add_panel_selects_it() {
        let mut state = state();
        state.ui.focused_pane = FocusedPane::Databases;

        reduce_panel(&mut state, &Action::AddPanel(ChartKind::Default), Instant::now());
        reduce_panel(&mut state, &Action::AddPanel(ChartKind::Sql), Instant::now());

        assert_eq!(state.panels.len(), 2);
        assert_eq!(state.ui.panel_selected, 1);
        assert_eq!(state.ui.focused_pane, FocusedPane::Panels);
        assert_eq!(state.selected_panel().unwrap().kind, ChartKind::Sql);
    }

    #[test]
    fn bind_to_unloaded_database_is_rejected() {
        let mut state = state();
        let id = state.panels.add_panel(ChartKind::Default);
        state.panels.drain_events();

        reduce_panel(
            &mut state,
            &Action::UpdatePanel {
                id: id.clone(),
                patch: PanelPatch::bind("/missing.duckdb"),
            },
            Instant::now(),
        );

        assert!(state.panels.must_get_panel(&id).unwrap().bound_database.is_none());
        assert!(state.panels.drain_events().is_empty());
        assert_eq!(
            state.messages.last_error.as_deref(),
            Some("Database not found: /missing.duckdb")
        );
    }

    #[test]
    fn update_unknown_panel_reports_error() {
        let mut state = state();

        reduce_panel(
            &mut state,
            &Action::UpdatePanel {
                id: PanelId::from_string("gone"),
                patch: PanelPatch::title("x"),
            },
            Instant::now(),
        );

        assert_eq!(
            state.messages.last_error.as_deref(),
            Some("Panel not found: gone")
        );
    }

    #[test]
    fn remove_selected_panel_dispatches_removal() {
        let mut state = state();
        let id = state.panels.add_panel(ChartKind::Default);

        let effects = reduce_panel(&mut state, &Action::RemoveSelected, Instant::now());

        assert_eq!(
            effects,
            Some(vec![Effect::DispatchActions(vec![Action::RemovePanel(id)])])
        );
    }

    #[test]
    fn remove_selected_database_dispatches_close() {
        let mut state = state();
        state.databases.add_database("/a.duckdb").unwrap();
        state.ui.focused_pane = FocusedPane::Databases;

        let effects = reduce_panel(&mut state, &Action::RemoveSelected, Instant::now());

        assert_eq!(
            effects,
            Some(vec![Effect::DispatchActions(vec![Action::CloseDatabase(
                "/a.duckdb".to_string()
            )])])
        );
    }

    #[test]
    fn remove_panel_clamps_selection() {
        let mut state = state();
        state.panels.add_panel(ChartKind::Default);
        let second = state.panels.add_panel(ChartKind::Default);
        state.ui.panel_selected = 1;

        reduce_panel(&mut state, &Action::RemovePanel(second), Instant::now());

        assert_eq!(state.ui.panel_selected, 0);
    }
}
