//! Owns every chart panel and records what changed for the orchestrator.
//!
//! Mutations append `PanelEvent`s to an outbox. The reducer drains it after
//! each action, so subscribers only ever see fully merged panels.

use duckboard_domain::{ChangedInputs, ChartKind, Panel, PanelId, PanelPatch};

use crate::error::RegistryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    Added(PanelId),
    Removed(PanelId),
    QueryInputsChanged {
        id: PanelId,
        changed: ChangedInputs,
    },
    /// The bound database was removed underneath the panel
    Unbound {
        id: PanelId,
        database: String,
    },
}

#[derive(Debug, Default)]
pub struct PanelRegistry {
    panels: Vec<Panel>,
    events: Vec<PanelEvent>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_panel(&mut self, kind: ChartKind) -> PanelId {
        let mut id = PanelId::new();
        while self.get(&id).is_some() {
            id = PanelId::new();
        }
        self.panels.push(Panel::new(id.clone(), kind));
        self.events.push(PanelEvent::Added(id.clone()));
        id
    }

    pub fn remove_panel(&mut self, id: &PanelId) -> Result<Panel, RegistryError> {
        let idx = self.position(id)?;
        let panel = self.panels.remove(idx);
        self.events.push(PanelEvent::Removed(id.clone()));
        Ok(panel)
    }

    /// Merges `patch` into the panel. Query-relevant changes are announced
    /// only after the merge, never for no-op edits.
    pub fn update_panel(
        &mut self,
        id: &PanelId,
        patch: PanelPatch,
    ) -> Result<ChangedInputs, RegistryError> {
        let idx = self.position(id)?;
        let changed = self.panels[idx].apply_patch(patch);
        if changed.any() {
            self.events.push(PanelEvent::QueryInputsChanged {
                id: id.clone(),
                changed,
            });
        }
        Ok(changed)
    }

    pub fn toggle_filter(
        &mut self,
        id: &PanelId,
        category: &str,
        value: &str,
    ) -> Result<ChangedInputs, RegistryError> {
        let filters = self.must_get_panel(id)?.filters_toggled(category, value);
        self.update_panel(id, PanelPatch::filters(filters))
    }

    /// Lookup for ids the caller knows to exist (e.g. taken from `list()`).
    /// An error here is a broken invariant, not a user mistake.
    pub fn must_get_panel(&self, id: &PanelId) -> Result<&Panel, RegistryError> {
        self.get(id)
            .ok_or_else(|| RegistryError::PanelNotFound(id.clone()))
    }

    pub fn get(&self, id: &PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| &p.id == id)
    }

    pub fn get_at(&self, idx: usize) -> Option<&Panel> {
        self.panels.get(idx)
    }

    pub(crate) fn get_mut(&mut self, id: &PanelId) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| &p.id == id)
    }

    /// Direct lifecycle access for render fixtures; bypasses change notices.
    #[cfg(any(test, feature = "test-support"))]
    pub fn get_mut_for_test(&mut self, id: &PanelId) -> &mut Panel {
        self.get_mut(id).expect("panel registered by the fixture")
    }

    pub fn list(&self) -> &[Panel] {
        &self.panels
    }

    pub fn ids(&self) -> Vec<PanelId> {
        self.panels.iter().map(|p| p.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Clears the binding of every panel bound to `path`.
    pub fn unbind_database(&mut self, path: &str) -> Vec<PanelId> {
        let mut unbound = Vec::new();
        for panel in self
            .panels
            .iter_mut()
            .filter(|p| p.bound_database.as_deref() == Some(path))
        {
            panel.apply_patch(PanelPatch::unbind());
            unbound.push(panel.id.clone());
            self.events.push(PanelEvent::Unbound {
                id: panel.id.clone(),
                database: path.to_string(),
            });
        }
        unbound
    }

    pub fn drain_events(&mut self) -> Vec<PanelEvent> {
        std::mem::take(&mut self.events)
    }

    fn position(&self, id: &PanelId) -> Result<usize, RegistryError> {
        self.panels
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| RegistryError::PanelNotFound(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn registry_with_panel() -> (PanelRegistry, PanelId) {
        let mut registry = PanelRegistry::new();
        let id = registry.add_panel(ChartKind::Capacity);
        registry.drain_events();
        (registry, id)
    }

    mod add_panel {
        use super::*;

        #[test]
        fn creates_default_unbound_panel() {
            let mut registry = PanelRegistry::new();

            let id = registry.add_panel(ChartKind::Default);

            let panel = registry.must_get_panel(&id).unwrap();
            assert_eq!(panel.kind, ChartKind::Default);
            assert!(panel.bound_database.is_none());
            assert!(!panel.is_loading());
            assert_eq!(registry.drain_events(), vec![PanelEvent::Added(id)]);
        }

        #[test]
        fn generates_unique_ids() {
            let mut registry = PanelRegistry::new();

            let first = registry.add_panel(ChartKind::Default);
            let second = registry.add_panel(ChartKind::Default);

            assert_ne!(first, second);
            assert_eq!(registry.ids(), vec![first, second]);
        }
    }

    mod unknown_ids {
        use super::*;

        #[rstest]
        #[case::never_added(false)]
        #[case::already_removed(true)]
        fn every_operation_fails_and_leaves_registry_unchanged(#[case] removed: bool) {
            let (mut registry, existing) = registry_with_panel();
            let missing = if removed {
                let id = registry.add_panel(ChartKind::Sql);
                registry.remove_panel(&id).unwrap();
                registry.drain_events();
                id
            } else {
                PanelId::from_string("missing")
            };
            let before = registry.list().to_vec();
            let expected = Err(RegistryError::PanelNotFound(missing.clone()));

            assert_eq!(registry.must_get_panel(&missing).map(|_| ()), expected);
            assert_eq!(
                registry
                    .update_panel(&missing, PanelPatch::title("x"))
                    .map(|_| ()),
                expected
            );
            assert_eq!(registry.remove_panel(&missing).map(|_| ()), expected);
            assert_eq!(
                registry.toggle_filter(&missing, "asset", "wind").map(|_| ()),
                expected
            );

            assert_eq!(registry.list(), before.as_slice());
            assert!(registry.get(&existing).is_some());
            assert!(registry.drain_events().is_empty());
        }
    }

    mod update_panel {
        use super::*;

        #[test]
        fn query_relevant_change_emits_event_after_merge() {
            let (mut registry, id) = registry_with_panel();

            registry
                .update_panel(&id, PanelPatch::bind("/a.duckdb"))
                .unwrap();

            let events = registry.drain_events();
            assert_eq!(events.len(), 1);
            assert!(matches!(
                &events[0],
                PanelEvent::QueryInputsChanged { id: event_id, changed }
                    if event_id == &id && changed.database
            ));
            assert_eq!(
                registry.must_get_panel(&id).unwrap().bound_database.as_deref(),
                Some("/a.duckdb")
            );
        }

        #[test]
        fn title_only_change_emits_nothing() {
            let (mut registry, id) = registry_with_panel();

            registry
                .update_panel(&id, PanelPatch::title("Renamed"))
                .unwrap();

            assert!(registry.drain_events().is_empty());
            assert_eq!(registry.must_get_panel(&id).unwrap().title, "Renamed");
        }

        #[test]
        fn toggle_filter_goes_through_merge() {
            let (mut registry, id) = registry_with_panel();

            let changed = registry.toggle_filter(&id, "asset", "wind").unwrap();

            assert!(changed.filters);
            assert!(
                registry.must_get_panel(&id).unwrap().filters["asset"].contains("wind")
            );
            assert_eq!(registry.drain_events().len(), 1);
        }
    }

    #[test]
    fn remove_panel_emits_removed_event() {
        let (mut registry, id) = registry_with_panel();

        let removed = registry.remove_panel(&id).unwrap();

        assert_eq!(removed.id, id);
        assert!(registry.is_empty());
        assert_eq!(registry.drain_events(), vec![PanelEvent::Removed(id)]);
    }

    #[test]
    fn unbind_database_only_touches_matching_panels() {
        let mut registry = PanelRegistry::new();
        let a = registry.add_panel(ChartKind::Capacity);
        let b = registry.add_panel(ChartKind::Capacity);
        let c = registry.add_panel(ChartKind::Capacity);
        registry.update_panel(&a, PanelPatch::bind("/a.duckdb")).unwrap();
        registry.update_panel(&b, PanelPatch::bind("/b.duckdb")).unwrap();
        registry.update_panel(&c, PanelPatch::bind("/a.duckdb")).unwrap();
        registry.drain_events();

        let unbound = registry.unbind_database("/a.duckdb");

        assert_eq!(unbound, vec![a.clone(), c.clone()]);
        assert!(registry.get(&a).unwrap().bound_database.is_none());
        assert_eq!(
            registry.get(&b).unwrap().bound_database.as_deref(),
            Some("/b.duckdb")
        );
        assert_eq!(
            registry.drain_events(),
            vec![
                PanelEvent::Unbound {
                    id: a,
                    database: "/a.duckdb".to_string()
                },
                PanelEvent::Unbound {
                    id: c,
                    database: "/a.duckdb".to_string()
                },
            ]
        );
    }
}
