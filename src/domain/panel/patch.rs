use super::{ChartKind, FilterSelection};

/// Partial update for a panel's user-editable fields.
///
/// `None` leaves a field untouched. The doubly-optional fields distinguish
/// "leave as is" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelPatch {
    pub kind: Option<ChartKind>,
    pub title: Option<String>,
    pub bound_database: Option<Option<String>>,
    pub filters: Option<FilterSelection>,
    pub breakdown: Option<Vec<String>>,
    pub sql: Option<Option<String>>,
}

impl PanelPatch {
    pub fn bind(path: impl Into<String>) -> Self {
        Self {
            bound_database: Some(Some(path.into())),
            ..Default::default()
        }
    }

    pub fn unbind() -> Self {
        Self {
            bound_database: Some(None),
            ..Default::default()
        }
    }

    pub fn kind(kind: ChartKind) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn filters(filters: FilterSelection) -> Self {
        Self {
            filters: Some(filters),
            ..Default::default()
        }
    }

    pub fn breakdown(nodes: Vec<String>) -> Self {
        Self {
            breakdown: Some(nodes),
            ..Default::default()
        }
    }

    pub fn sql(sql: impl Into<String>) -> Self {
        let sql = sql.into();
        let trimmed = sql.trim();
        Self {
            sql: Some((!trimmed.is_empty()).then(|| trimmed.to_string())),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Database path this patch binds to, if it binds at all.
    pub fn bound_path(&self) -> Option<&str> {
        self.bound_database
            .as_ref()
            .and_then(|binding| binding.as_deref())
    }
}

/// Which query inputs a merge actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangedInputs {
    pub database: bool,
    pub kind: bool,
    pub filters: bool,
    pub breakdown: bool,
    pub sql: bool,
}

impl ChangedInputs {
    pub fn any(&self) -> bool {
        self.database || self.kind || self.filters || self.breakdown || self.sql
    }

    /// Discrete selections (binding, chart kind) as opposed to edits that
    /// usually arrive in bursts.
    pub fn is_discrete(&self) -> bool {
        self.database || self.kind
    }
}
