//! Executes side effects returned by the reducer.
//!
//! Every gateway or metadata call runs in its own task and reports back
//! through `action_tx`. Query tasks are cancellable per panel: a new
//! `ExecuteQuery` for a panel cancels the previous token, and `CancelQuery`
//! cancels it outright. A cancelled task sends nothing. Dropping the gateway
//! future is what stops the underlying work, so adapters must clean up on
//! drop (e.g. `kill_on_drop` for child processes).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use color_eyre::eyre::Result;
use tokio::sync::{Semaphore, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use duckboard_domain::PanelId;

use crate::action::Action;
use crate::effect::Effect;
use crate::ports::{HistoryStore, MetadataProvider, QueryError, QueryGateway, Renderer};
use crate::state::AppState;

pub struct EffectRunner {
    gateway: Arc<dyn QueryGateway>,
    metadata: Arc<dyn MetadataProvider>,
    history_store: Arc<dyn HistoryStore>,
    query_slots: Arc<Semaphore>,
    in_flight: HashMap<PanelId, CancellationToken>,
    /// Sequence number of the newest history snapshot written to disk
    history_written: Arc<Mutex<u64>>,
    history_seq: u64,
    action_tx: mpsc::Sender<Action>,
}

impl EffectRunner {
    pub fn new(
        gateway: Arc<dyn QueryGateway>,
        metadata: Arc<dyn MetadataProvider>,
        history_store: Arc<dyn HistoryStore>,
        max_concurrent_queries: usize,
        action_tx: mpsc::Sender<Action>,
    ) -> Self {
        Self {
            gateway,
            metadata,
            history_store,
            query_slots: Arc::new(Semaphore::new(max_concurrent_queries.max(1))),
            in_flight: HashMap::new(),
            history_written: Arc::new(Mutex::new(0)),
            history_seq: 0,
            action_tx,
        }
    }

    pub async fn run(
        &mut self,
        effects: Vec<Effect>,
        renderer: &mut dyn Renderer,
        state: &AppState,
    ) -> Result<()> {
        for effect in effects {
            self.run_single(effect, renderer, state).await?;
        }
        Ok(())
    }

    /// Panels whose latest query has not been cancelled. Finished queries
    /// keep their token until the next issue or cancel for that panel.
    pub fn tracked_queries(&self) -> usize {
        self.in_flight.len()
    }

    async fn run_single(
        &mut self,
        effect: Effect,
        renderer: &mut dyn Renderer,
        state: &AppState,
    ) -> Result<()> {
        match effect {
            Effect::Render => renderer.draw(state)?,
            Effect::ExecuteQuery {
                panel_id,
                database_path,
                sql,
                generation,
            } => self.spawn_query(panel_id, database_path, sql, generation),
            Effect::CancelQuery { panel_id } => {
                if let Some(token) = self.in_flight.remove(&panel_id) {
                    debug!(panel_id = %panel_id, "cancelling query");
                    token.cancel();
                }
            }
            Effect::LoadDatabase { database_path } => {
                let metadata = Arc::clone(&self.metadata);
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let database_path = canonical_path(database_path).await;
                    let action = match metadata.list_tables(&database_path).await {
                        Ok(tables) => Action::DatabaseOpened {
                            database_path,
                            tables,
                        },
                        Err(e) => Action::DatabaseOpenFailed {
                            database_path,
                            error: e.to_string(),
                        },
                    };
                    let _ = tx.send(action).await;
                });
            }
            Effect::FetchTables { database_path } => {
                let metadata = Arc::clone(&self.metadata);
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let action = match metadata.list_tables(&database_path).await {
                        Ok(tables) => Action::TablesLoaded {
                            database_path,
                            tables,
                        },
                        Err(e) => Action::TablesFailed {
                            database_path,
                            error: e.to_string(),
                        },
                    };
                    let _ = tx.send(action).await;
                });
            }
            Effect::PersistHistory { entries } => self.spawn_persist(entries),
            Effect::DispatchActions(actions) => {
                for action in actions {
                    let _ = self.action_tx.send(action).await;
                }
            }
            Effect::Sequence(effects) => {
                for effect in effects {
                    Box::pin(self.run_single(effect, renderer, state)).await?;
                }
            }
        }
        Ok(())
    }

    fn spawn_query(&mut self, panel_id: PanelId, database_path: String, sql: String, generation: u64) {
        let token = CancellationToken::new();
        if let Some(previous) = self.in_flight.insert(panel_id.clone(), token.clone()) {
            previous.cancel();
        }

        let gateway = Arc::clone(&self.gateway);
        let slots = Arc::clone(&self.query_slots);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let outcome = tokio::select! {
                () = token.cancelled() => {
                    debug!(panel_id = %panel_id, generation, "query cancelled");
                    return;
                }
                outcome = async {
                    let _permit = slots
                        .acquire_owned()
                        .await
                        .map_err(|_| QueryError::new("Query executor is shutting down"))?;
                    gateway.execute(&database_path, &sql).await
                } => outcome,
            };
            let _ = tx
                .send(Action::QueryCompleted {
                    panel_id,
                    generation,
                    database_path,
                    sql,
                    outcome,
                })
                .await;
        });
    }

    /// Writes run on the blocking pool; a snapshot older than the last one
    /// written is skipped so the file always ends up with the newest log.
    fn spawn_persist(&mut self, entries: Vec<String>) {
        self.history_seq += 1;
        let seq = self.history_seq;
        let store = Arc::clone(&self.history_store);
        let written = Arc::clone(&self.history_written);
        tokio::task::spawn_blocking(move || {
            let Ok(mut last) = written.lock() else {
                warn!("history writer lock poisoned");
                return;
            };
            if *last > seq {
                return;
            }
            match store.save(&entries) {
                Ok(()) => *last = seq,
                Err(e) => warn!(error = %e, "failed to persist query history"),
            }
        });
    }
}

/// Registry keys are canonical, so one file never loads under two paths.
/// Unresolvable paths are kept as given and fail in the metadata call.
async fn canonical_path(path: String) -> String {
    match tokio::fs::canonicalize(&path).await {
        Ok(resolved) => resolved.to_string_lossy().into_owned(),
        Err(_) => path,
    }
}
