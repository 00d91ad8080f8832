mod chart_kind;
mod id;
mod patch;

use std::collections::{BTreeMap, BTreeSet};

pub use chart_kind::{ChartKind, UnknownChartKind};
pub use id::PanelId;
pub use patch::{ChangedInputs, PanelPatch};

use crate::chart::ChartOption;

/// Selected values per filter category, ordered for deterministic SQL.
pub type FilterSelection = BTreeMap<String, BTreeSet<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Failed,
}

impl PanelStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "loading",
            Self::Success => "ready",
            Self::Failed => "failed",
        }
    }
}

/// One chart panel: its configuration plus the query lifecycle fields.
///
/// The lifecycle fields (`is_loading`, `error`, `result`,
/// `result_generation`) only change through the methods below, which keep
/// `error` and `result` mutually exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub id: PanelId,
    pub kind: ChartKind,
    pub title: String,
    pub bound_database: Option<String>,
    pub filters: FilterSelection,
    pub breakdown: Vec<String>,
    pub sql: Option<String>,
    is_loading: bool,
    error: Option<String>,
    result: Option<ChartOption>,
    result_generation: u64,
}

impl Panel {
    pub fn new(id: PanelId, kind: ChartKind) -> Self {
        Self {
            id,
            kind,
            title: kind.label().to_string(),
            bound_database: None,
            filters: FilterSelection::new(),
            breakdown: Vec::new(),
            sql: None,
            is_loading: false,
            error: None,
            result: None,
            result_generation: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&ChartOption> {
        self.result.as_ref()
    }

    pub fn result_generation(&self) -> u64 {
        self.result_generation
    }

    pub fn status(&self) -> PanelStatus {
        if self.is_loading {
            PanelStatus::Pending
        } else if self.error.is_some() {
            PanelStatus::Failed
        } else if self.result.is_some() {
            PanelStatus::Success
        } else {
            PanelStatus::Idle
        }
    }

    /// Merges `patch` and reports which query inputs changed value.
    pub fn apply_patch(&mut self, patch: PanelPatch) -> ChangedInputs {
        let mut changed = ChangedInputs::default();

        if let Some(kind) = patch.kind
            && kind != self.kind
        {
            self.kind = kind;
            changed.kind = true;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(binding) = patch.bound_database
            && binding != self.bound_database
        {
            self.bound_database = binding;
            changed.database = true;
        }
        if let Some(filters) = patch.filters {
            let filters: FilterSelection = filters
                .into_iter()
                .filter(|(_, values)| !values.is_empty())
                .collect();
            if filters != self.filters {
                self.filters = filters;
                changed.filters = true;
            }
        }
        if let Some(breakdown) = patch.breakdown
            && breakdown != self.breakdown
        {
            self.breakdown = breakdown;
            changed.breakdown = true;
        }
        if let Some(sql) = patch.sql
            && sql != self.sql
        {
            self.sql = sql;
            changed.sql = true;
        }

        changed
    }

    /// Filters with `value` toggled inside `category`.
    pub fn filters_toggled(&self, category: &str, value: &str) -> FilterSelection {
        let mut filters = self.filters.clone();
        let values = filters.entry(category.to_string()).or_default();
        if !values.remove(value) {
            values.insert(value.to_string());
        }
        filters.retain(|_, values| !values.is_empty());
        filters
    }

    /// Starts a new query attempt and returns its generation.
    pub fn next_generation(&mut self) -> u64 {
        self.result_generation += 1;
        self.result_generation
    }

    /// Marks a query as outstanding; any previous error is dropped while the
    /// last result stays visible until replaced.
    pub fn mark_pending(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub fn reset_idle(&mut self) {
        self.is_loading = false;
        self.error = None;
        self.result = None;
    }

    pub fn apply_success(&mut self, option: ChartOption) {
        self.is_loading = false;
        self.error = None;
        self.result = Some(option);
    }

    pub fn apply_failure(&mut self, message: String) {
        self.is_loading = false;
        self.result = None;
        self.error = Some(message);
    }
}
