//! Database sub-reducer: open, close, and table-list refresh.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, warn};

use crate::action::Action;
use crate::effect::Effect;
use crate::error::RegistryError;
use crate::focused_pane::FocusedPane;
use crate::orchestrator::requery_database;
use crate::state::AppState;

const DUCKDB_EXTENSION: &str = "duckdb";

/// Handles database lifecycle actions.
/// Returns Some(effects) if action was handled, None otherwise.
pub fn reduce_database(state: &mut AppState, action: &Action, now: Instant) -> Option<Vec<Effect>> {
    match action {
        Action::OpenDatabase(path) => {
            let path = path.trim();
            if !has_duckdb_extension(path) {
                state.set_error(format!("Not a .duckdb file: {path}"), now);
                return Some(vec![]);
            }
            if state.databases.contains(path) {
                report(state, RegistryError::DuplicateDatabase(path.to_string()), now);
                return Some(vec![]);
            }
            Some(vec![Effect::LoadDatabase {
                database_path: path.to_string(),
            }])
        }
        Action::DatabaseOpened {
            database_path,
            tables,
        } => {
            if let Err(e) = state.databases.add_database(database_path.clone()) {
                report(state, e, now);
                return Some(vec![]);
            }
            if let Err(e) = state.databases.refresh_tables(database_path, tables.clone()) {
                report(state, e, now);
                return Some(vec![]);
            }
            state.ui.database_selected = state.databases.len() - 1;
            let name = state
                .databases
                .get(database_path)
                .map_or(database_path.as_str(), |db| db.display_name())
                .to_string();
            state.set_success(format!("Opened {name} ({} tables)", tables.len()), now);
            Some(vec![])
        }
        Action::DatabaseOpenFailed {
            database_path,
            error,
        } => {
            warn!(path = %database_path, error = %error, "failed to open database");
            state.set_error(format!("Failed to open {database_path}: {error}"), now);
            Some(vec![])
        }
        Action::CloseDatabase(path) => {
            match state.databases.remove_database(path) {
                Ok(_) => {
                    state.result_cache.invalidate_database(path);
                    let unbound = state.panels.unbind_database(path);
                    state.clamp_selections();
                    debug!(path = %path, unbound = unbound.len(), "database closed");
                    state.set_success(
                        format!("Closed {path} ({} panel(s) unbound)", unbound.len()),
                        now,
                    );
                }
                Err(e) => report(state, e, now),
            }
            Some(vec![])
        }
        Action::RefreshTables(path) => Some(refresh(state, path, now)),
        Action::RefreshSelected => {
            let path = match state.ui.focused_pane {
                FocusedPane::Panels => state
                    .selected_panel()
                    .and_then(|p| p.bound_database.clone()),
                _ => None,
            }
            .or_else(|| state.selected_database().map(|db| db.path.clone()));

            match path {
                Some(path) => Some(refresh(state, &path, now)),
                None => {
                    state.set_error("No database selected", now);
                    Some(vec![])
                }
            }
        }
        Action::TablesLoaded {
            database_path,
            tables,
        } => {
            if state
                .databases
                .refresh_tables(database_path, tables.clone())
                .is_err()
            {
                debug!(path = %database_path, "table list for closed database ignored");
            }
            Some(vec![])
        }
        Action::TablesFailed {
            database_path,
            error,
        } => {
            warn!(path = %database_path, error = %error, "table list fetch failed");
            if state
                .databases
                .set_tables_error(database_path, error.clone())
                .is_ok()
            {
                state.set_error(format!("Failed to list tables: {error}"), now);
            }
            Some(vec![])
        }
        _ => None,
    }
}

/// Reloads the table list and re-runs the panels bound to `path`.
fn refresh(state: &mut AppState, path: &str, now: Instant) -> Vec<Effect> {
    if let Err(e) = state.databases.set_tables_loading(path) {
        report(state, e, now);
        return vec![];
    }
    let mut effects = vec![Effect::FetchTables {
        database_path: path.to_string(),
    }];
    effects.extend(requery_database(state, path, now));
    effects
}

fn report(state: &mut AppState, e: RegistryError, now: Instant) {
    warn!(error = %e, "registry operation rejected");
    state.set_error(e.to_string(), now);
}

fn has_duckdb_extension(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|ext| ext == DUCKDB_EXTENSION)
}
