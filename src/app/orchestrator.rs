//! Query orchestration: turns panel change notices into query effects and
//! applies completed queries back onto panels.
//!
//! # Generation guard
//!
//! Every re-evaluation bumps the panel's `result_generation` before anything
//! else happens. Completions carry the generation they were issued with and
//! are applied only if it still matches, so responses may arrive in any order
//! and transport-level cancellation is an optimization, never a requirement.
//!
//! # Triggers
//!
//! Binding and chart-kind changes issue immediately. Filter, breakdown and
//! SQL edits are debounced: the panel goes Pending at once, but the query is
//! only issued once `debounce` has passed without another edit
//! (`Action::DispatchDueQueries`).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use duckboard_domain::{ChartOption, ColumnarResult, PanelId};

use crate::effect::Effect;
use crate::panel_registry::PanelEvent;
use crate::ports::QueryError;
use crate::query_builder::build_query;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Immediate,
    Debounced,
}

/// Debounce bookkeeping. Panel lifecycle fields live on `Panel` itself.
#[derive(Debug, Clone, Default)]
pub struct QueryOrchestrator {
    debounce: Duration,
    scheduled: HashMap<PanelId, Instant>,
}

impl QueryOrchestrator {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            scheduled: HashMap::new(),
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn is_scheduled(&self, id: &PanelId) -> bool {
        self.scheduled.contains_key(id)
    }

    pub fn scheduled_at(&self, id: &PanelId) -> Option<Instant> {
        self.scheduled.get(id).copied()
    }

    /// Earliest pending dispatch, used by the main loop as a wake-up.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduled.values().min().copied()
    }

    fn schedule(&mut self, id: PanelId, at: Instant) {
        self.scheduled.insert(id, at);
    }

    fn unschedule(&mut self, id: &PanelId) -> bool {
        self.scheduled.remove(id).is_some()
    }

    fn take_due(&mut self, now: Instant) -> Vec<PanelId> {
        let mut due: Vec<(PanelId, Instant)> = self
            .scheduled
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(id, at)| (id.clone(), *at))
            .collect();
        due.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        for (id, _) in &due {
            self.scheduled.remove(id);
        }
        due.into_iter().map(|(id, _)| id).collect()
    }

    fn trigger_for(&self, discrete: bool) -> Trigger {
        if discrete || self.debounce.is_zero() {
            Trigger::Immediate
        } else {
            Trigger::Debounced
        }
    }
}

/// Consumes the panel registry's outbox. Runs after every reducer step.
pub fn process_events(state: &mut AppState, now: Instant) -> Vec<Effect> {
    let mut effects = Vec::new();
    for event in state.panels.drain_events() {
        match event {
            PanelEvent::Added(id) => {
                debug!(panel_id = %id, "panel added");
            }
            PanelEvent::Removed(id) => {
                state.orchestrator.unschedule(&id);
                debug!(panel_id = %id, "panel removed, cancelling its query");
                effects.push(Effect::CancelQuery { panel_id: id });
            }
            PanelEvent::QueryInputsChanged { id, changed } => {
                let trigger = state.orchestrator.trigger_for(changed.is_discrete());
                effects.extend(reevaluate(state, &id, trigger, now));
            }
            PanelEvent::Unbound { id, database } => {
                debug!(panel_id = %id, path = %database, "panel unbound from closed database");
                effects.extend(reevaluate(state, &id, Trigger::Immediate, now));
            }
        }
    }
    effects
}

/// Starts a new query attempt for `id` from its current configuration.
pub fn reevaluate(state: &mut AppState, id: &PanelId, trigger: Trigger, now: Instant) -> Vec<Effect> {
    let Some(panel) = state.panels.get_mut(id) else {
        error!(panel_id = %id, "re-evaluation requested for unknown panel");
        return vec![];
    };

    let was_loading = panel.is_loading();
    let generation = panel.next_generation();
    let database_path = panel.bound_database.clone();
    let sql = database_path.as_ref().and_then(|_| build_query(panel));

    let (Some(database_path), Some(sql)) = (database_path, sql) else {
        panel.reset_idle();
        state.orchestrator.unschedule(id);
        return if was_loading {
            vec![Effect::CancelQuery {
                panel_id: id.clone(),
            }]
        } else {
            vec![]
        };
    };

    panel.mark_pending();
    match trigger {
        Trigger::Immediate => issue(state, id, database_path, sql, generation),
        Trigger::Debounced => {
            let at = now + state.orchestrator.debounce;
            state.orchestrator.schedule(id.clone(), at);
            debug!(panel_id = %id, generation, "query scheduled");
            if was_loading {
                vec![Effect::CancelQuery {
                    panel_id: id.clone(),
                }]
            } else {
                vec![]
            }
        }
    }
}

/// Issues every debounced query whose deadline has passed. SQL is derived
/// from the configuration at this moment.
pub fn dispatch_due(state: &mut AppState, now: Instant) -> Vec<Effect> {
    let mut effects = Vec::new();
    for id in state.orchestrator.take_due(now) {
        let Some(panel) = state.panels.get(&id) else {
            continue;
        };
        let generation = panel.result_generation();
        match (panel.bound_database.clone(), build_query(panel)) {
            (Some(database_path), Some(sql)) => {
                effects.extend(issue(state, &id, database_path, sql, generation));
            }
            _ => {
                warn!(panel_id = %id, "scheduled query no longer runnable");
                if let Some(panel) = state.panels.get_mut(&id) {
                    panel.reset_idle();
                }
            }
        }
    }
    effects
}

/// Re-runs every panel bound to `database_path`, bypassing cached results.
pub fn requery_database(state: &mut AppState, database_path: &str, now: Instant) -> Vec<Effect> {
    state.result_cache.invalidate_database(database_path);
    let bound: Vec<PanelId> = state
        .panels
        .list()
        .iter()
        .filter(|p| p.bound_database.as_deref() == Some(database_path))
        .map(|p| p.id.clone())
        .collect();
    bound
        .iter()
        .flat_map(|id| reevaluate(state, id, Trigger::Immediate, now))
        .collect()
}

fn issue(
    state: &mut AppState,
    id: &PanelId,
    database_path: String,
    sql: String,
    generation: u64,
) -> Vec<Effect> {
    state.orchestrator.unschedule(id);

    let mut effects = Vec::new();
    if state.history.push(&sql) {
        effects.push(Effect::PersistHistory {
            entries: state.history.entries(),
        });
    }

    if let Some(cached) = state.result_cache.get(&database_path, &sql)
        && let Some(panel) = state.panels.get_mut(id)
    {
        debug!(panel_id = %id, generation, path = %database_path, "served from result cache");
        let option = ChartOption::from_result(panel.kind, panel.title.clone(), &cached);
        panel.apply_success(option);
        effects.push(Effect::CancelQuery {
            panel_id: id.clone(),
        });
        return effects;
    }

    info!(panel_id = %id, generation, path = %database_path, "query issued");
    effects.push(Effect::ExecuteQuery {
        panel_id: id.clone(),
        database_path,
        sql,
        generation,
    });
    effects
}

/// Applies a finished query if it is still the panel's latest attempt.
pub fn apply_completion(
    state: &mut AppState,
    panel_id: &PanelId,
    generation: u64,
    database_path: &str,
    sql: &str,
    outcome: Result<ColumnarResult, QueryError>,
) -> Vec<Effect> {
    let Some(panel) = state.panels.get_mut(panel_id) else {
        debug!(panel_id = %panel_id, generation, "response for removed panel discarded");
        return vec![];
    };
    if panel.result_generation() != generation {
        debug!(
            panel_id = %panel_id,
            generation,
            current = panel.result_generation(),
            "stale response discarded"
        );
        return vec![];
    }

    match outcome {
        Ok(result) => {
            debug!(panel_id = %panel_id, generation, rows = result.row_count, "query succeeded");
            let option = ChartOption::from_result(panel.kind, panel.title.clone(), &result);
            panel.apply_success(option);
            // Past the generation guard, so these rows postdate any refresh.
            if state.databases.contains(database_path) {
                state
                    .result_cache
                    .insert(database_path, sql, Arc::new(result));
            }
        }
        Err(e) => {
            warn!(panel_id = %panel_id, generation, error = %e, "query failed");
            panel.apply_failure(e.message);
        }
    }
    vec![]
}
