//! Side effects returned by the reducer, executed by EffectRunner.

use duckboard_domain::PanelId;

use crate::action::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Render,

    /// Completion arrives as `Action::QueryCompleted` tagged with `generation`
    ExecuteQuery {
        panel_id: PanelId,
        database_path: String,
        sql: String,
        generation: u64,
    },
    /// Best effort; the generation guard discards anything that slips through
    CancelQuery {
        panel_id: PanelId,
    },

    /// Validates the file and lists its tables; the entry is only created
    /// once this succeeds
    LoadDatabase {
        database_path: String,
    },
    FetchTables {
        database_path: String,
    },

    PersistHistory {
        entries: Vec<String>,
    },

    /// Ensures ordering: e.g., CancelQuery must run before the next ExecuteQuery
    Sequence(Vec<Effect>),

    /// Dispatch actions to be processed by the reducer
    DispatchActions(Vec<Action>),
}

impl Effect {
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render)
    }

    pub fn is_execute_for(&self, id: &PanelId) -> bool {
        matches!(self, Self::ExecuteQuery { panel_id, .. } if panel_id == id)
    }

    pub fn is_cancel_for(&self, id: &PanelId) -> bool {
        matches!(self, Self::CancelQuery { panel_id } if panel_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_is_render() {
        assert!(Effect::Render.is_render());
        assert!(
            !Effect::FetchTables {
                database_path: "/a.duckdb".to_string()
            }
            .is_render()
        );
    }

    #[test]
    fn execute_matches_only_its_panel() {
        let effect = Effect::ExecuteQuery {
            panel_id: PanelId::from_string("p1"),
            database_path: "/a.duckdb".to_string(),
            sql: "SELECT 1".to_string(),
            generation: 1,
        };

        assert!(effect.is_execute_for(&PanelId::from_string("p1")));
        assert!(!effect.is_execute_for(&PanelId::from_string("p2")));
        assert!(!effect.is_cancel_for(&PanelId::from_string("p1")));
    }
}
