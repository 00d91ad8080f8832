use std::time::Instant;

use duckboard_domain::{Database, Panel};

use super::cache::ResultCache;
use super::config::AppConfig;
use super::database_registry::DatabaseRegistry;
use super::focused_pane::FocusedPane;
use super::message_state::MessageState;
use super::orchestrator::QueryOrchestrator;
use super::panel_registry::PanelRegistry;
use super::query_history::QueryHistory;
use super::ui_state::UiState;

/// Everything the reducer owns. `main` is the only writer.
#[derive(Debug)]
pub struct AppState {
    pub databases: DatabaseRegistry,
    pub panels: PanelRegistry,
    pub orchestrator: QueryOrchestrator,
    pub history: QueryHistory,
    pub result_cache: ResultCache,
    pub ui: UiState,
    pub messages: MessageState,
    pub should_quit: bool,
    pub render_dirty: bool,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            databases: DatabaseRegistry::new(),
            panels: PanelRegistry::new(),
            orchestrator: QueryOrchestrator::new(config.debounce()),
            history: QueryHistory::new(config.history_limit),
            result_cache: ResultCache::new(config.result_cache_size),
            ui: UiState::default(),
            messages: MessageState::default(),
            should_quit: false,
            render_dirty: true,
        }
    }

    /// Replaces the history log with entries restored from disk.
    pub fn restore_history(&mut self, entries: Vec<String>) {
        self.history = QueryHistory::from_entries(entries, self.history.limit());
    }

    pub fn selected_panel(&self) -> Option<&Panel> {
        self.panels.get_at(self.ui.panel_selected)
    }

    pub fn selected_database(&self) -> Option<&Database> {
        self.databases.get_at(self.ui.database_selected)
    }

    pub fn pane_len(&self, pane: FocusedPane) -> usize {
        match pane {
            FocusedPane::Databases => self.databases.len(),
            FocusedPane::Panels => self.panels.len(),
            FocusedPane::History => self.history.len(),
        }
    }

    /// Keeps every cursor inside its list after removals.
    pub fn clamp_selections(&mut self) {
        for pane in [FocusedPane::Databases, FocusedPane::Panels, FocusedPane::History] {
            let len = self.pane_len(pane);
            self.ui.clamp_selection(pane, len);
        }
    }

    pub fn set_error(&mut self, msg: impl Into<String>, now: Instant) {
        self.messages.set_error_at(msg, now);
    }

    pub fn set_success(&mut self, msg: impl Into<String>, now: Instant) {
        self.messages.set_success_at(msg, now);
    }

    pub fn clear_expired_timers(&mut self, now: Instant) {
        self.messages.clear_expired_at(now);
    }

    pub fn mark_dirty(&mut self) {
        self.render_dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.render_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duckboard_domain::ChartKind;

    #[test]
    fn new_state_is_empty_and_dirty() {
        let state = AppState::new(&AppConfig::default());

        assert!(!state.databases.has_any());
        assert!(state.panels.is_empty());
        assert!(state.history.is_empty());
        assert!(state.render_dirty);
        assert!(!state.should_quit);
    }

    #[test]
    fn restore_history_keeps_configured_limit() {
        let config = AppConfig {
            history_limit: 2,
            ..Default::default()
        };
        let mut state = AppState::new(&config);

        state.restore_history(vec!["a".into(), "b".into(), "c".into()]);

        assert_eq!(state.history.entries(), vec!["a", "b"]);
    }

    #[test]
    fn clamp_selections_follows_removals() {
        let mut state = AppState::new(&AppConfig::default());
        let first = state.panels.add_panel(ChartKind::Default);
        let second = state.panels.add_panel(ChartKind::Default);
        state.ui.panel_selected = 1;

        state.panels.remove_panel(&second).unwrap();
        state.clamp_selections();

        assert_eq!(state.selected_panel().map(|p| &p.id), Some(&first));
    }
}
